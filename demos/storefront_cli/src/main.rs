// demos/storefront_cli/src/main.rs

mod config;
mod errors;

use crate::config::AppConfig;
use crate::errors::{AppError, Result as AppResult};

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::ExitCode;
use storefront::presentation::{format_price, star_rating};
use storefront::{CartView, PaymentOutcome, StorefrontClient};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront client: cart, wishlist, comments and checkout against the shop API", long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Cart operations
  #[command(subcommand)]
  Cart(CartCommands),
  /// Wishlist operations
  #[command(subcommand)]
  Wishlist(WishlistCommands),
  /// Show a product page
  Product {
    product_id: u64,
  },
  /// Comment on a product
  Comment {
    product_id: u64,
    #[arg(long, default_value_t = 5)]
    stars: u8,
    text: String,
  },
  /// Create a checkout session for the checked lines and print its URL
  Checkout,
  /// Print the order id of a payment-success redirect path
  PaymentResult {
    path: String,
  },
}

#[derive(Subcommand)]
enum CartCommands {
  /// List the cart with totals
  List,
  Add {
    #[arg(long)]
    variant: u64,
    #[arg(long)]
    size: Option<u64>,
    #[arg(long, default_value_t = 1)]
    qty: u32,
    /// Add the line without selecting it for checkout
    #[arg(long)]
    unchecked: bool,
  },
  Remove {
    #[arg(long)]
    variant: u64,
    #[arg(long)]
    size: Option<u64>,
  },
  Update {
    #[arg(long)]
    variant: u64,
    #[arg(long)]
    size: Option<u64>,
    /// Raw quantity, sanitized like the quantity input of the cart page
    #[arg(long)]
    qty: String,
    #[arg(long)]
    unchecked: bool,
  },
  /// Select or deselect a line for checkout
  Check {
    #[arg(long)]
    variant: u64,
    #[arg(long)]
    size: Option<u64>,
    #[arg(long)]
    off: bool,
  },
  Clear,
}

#[derive(Subcommand)]
enum WishlistCommands {
  Check {
    #[arg(long)]
    variant: u64,
  },
  Add {
    #[arg(long)]
    variant: u64,
  },
  Remove {
    #[arg(long)]
    variant: u64,
  },
}

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  match run(cli).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!(error = %e, "Command failed.");
      eprintln!("error: {}", e);
      ExitCode::from(e.exit_code() as u8)
    }
  }
}

async fn run(cli: Cli) -> AppResult<()> {
  // Parsing a redirect path needs neither configuration nor network.
  if let Commands::PaymentResult { path } = &cli.command {
    let outcome =
      PaymentOutcome::from_path(path).ok_or_else(|| AppError::Internal(format!("Not a payment-success path: {}", path)))?;
    return print_line(&outcome.message());
  }

  let app_config = AppConfig::from_env()?;
  let client = StorefrontClient::connect(app_config.client_config()?)?;

  match &app_config.session {
    Some(session) => client.sign_in(session.clone()).await?,
    None => tracing::info!("No session configured, running anonymously."),
  }

  match cli.command {
    Commands::Cart(command) => run_cart(&client, command).await,
    Commands::Wishlist(command) => run_wishlist(&client, command).await,
    Commands::Product { product_id } => {
      let page = client.product_page(product_id).await?;
      let mut out = std::io::stdout().lock();
      writeln!(out, "{} (#{})", page.product.title, page.product.id).context("writing product")?;
      let stars: String = star_rating(page.product.avg_rating).iter().map(|s| s.glyph()).collect();
      let rating = page
        .product
        .avg_rating
        .map_or_else(|| "not rated".to_string(), |r| format!("{:.1}", r));
      writeln!(out, "  rating: {} ({})", stars, rating).context("writing product")?;
      if let Some(category) = &page.category {
        writeln!(out, "  category: {}", category.title).context("writing product")?;
      }
      for variant in &page.product.variants {
        writeln!(
          out,
          "  variant {}: {} {}",
          variant.id,
          format_price(variant.price),
          variant.color.as_deref().unwrap_or("")
        )
        .context("writing product")?;
      }
      writeln!(out, "  on wishlist: {}", page.wished).context("writing product")?;
      writeln!(out, "  comments: {}", page.thread.comments.len()).context("writing product")?;
      for comment in &page.thread.comments {
        let author = page
          .thread
          .users
          .get(&comment.user)
          .map(|u| u.username.as_str())
          .unwrap_or("unknown");
        writeln!(out, "    [{}*] {}: {}", comment.stars, author, comment.comment).context("writing product")?;
      }
      let related: Vec<String> = page.related().iter().map(|p| p.title.clone()).collect();
      if !related.is_empty() {
        writeln!(out, "  related: {}", related.join(", ")).context("writing product")?;
      }
      Ok(())
    }
    Commands::Comment {
      product_id,
      stars,
      text,
    } => {
      let thread = client.comment_thread(product_id);
      let saved = thread.add_comment(&text, stars).await?;
      print_line(&format!("Saved comment #{}", saved.id))
    }
    Commands::Checkout => {
      let redirect = client.checkout().await?;
      print_line(&redirect.url)
    }
    Commands::PaymentResult { .. } => Ok(()),
  }
}

async fn run_cart(client: &StorefrontClient, command: CartCommands) -> AppResult<()> {
  if !client.session().is_active() {
    return Err(AppError::NotSignedIn);
  }
  let cart = client.cart();
  match command {
    CartCommands::List => {}
    CartCommands::Add {
      variant,
      size,
      qty,
      unchecked,
    } => cart.add(variant, size, qty, !unchecked).await?,
    CartCommands::Remove { variant, size } => cart.remove(variant, size).await?,
    CartCommands::Update {
      variant,
      size,
      qty,
      unchecked,
    } => {
      let stock = cart.read(|state| state.find(storefront::LineKey::new(variant, size)).and_then(|l| l.variant.stock));
      let quantity = storefront::presentation::parse_quantity(&qty, stock);
      cart.update_quantity(variant, size, quantity, !unchecked).await?
    }
    CartCommands::Check { variant, size, off } => cart.update_checked(variant, size, !off).await?,
    CartCommands::Clear => cart.clear().await?,
  }
  print_cart(&client.cart_view())
}

async fn run_wishlist(client: &StorefrontClient, command: WishlistCommands) -> AppResult<()> {
  let wishlist = client.wishlist();
  match command {
    WishlistCommands::Check { variant } => {
      let exists = wishlist.check_exists(Some(variant)).await?;
      print_line(&format!("variant {} on wishlist: {}", variant, exists))
    }
    WishlistCommands::Add { variant } => {
      let id = wishlist.add(variant).await?;
      print_line(&format!("added as wishlist entry #{}", id))
    }
    WishlistCommands::Remove { variant } => {
      let id = wishlist.remove(variant).await?;
      print_line(&format!("removed wishlist entry #{}", id))
    }
  }
}

fn print_cart(view: &CartView) -> AppResult<()> {
  let mut out = std::io::stdout().lock();
  if view.is_empty() {
    writeln!(out, "Your cart is empty").context("writing cart")?;
    return Ok(());
  }
  for row in view.rows() {
    writeln!(
      out,
      "[{}] {:<40} {:>10} x{:<3} size {:<6} {}",
      if row.checked { "x" } else { " " },
      row.display_title(),
      format_price(row.price),
      row.quantity,
      row.size_label.as_deref().unwrap_or("-"),
      row.link.as_deref().unwrap_or("")
    )
    .context("writing cart")?;
  }
  let summary = view.summary();
  writeln!(out, "Subtotal {}", summary.subtotal).context("writing cart")?;
  writeln!(out, "Total    {}", summary.total).context("writing cart")?;
  Ok(())
}

fn print_line(line: &str) -> AppResult<()> {
  writeln!(std::io::stdout().lock(), "{}", line).context("writing to stdout")?;
  Ok(())
}
