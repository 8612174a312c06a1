use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use storefront::cart::{reduce, CartAction, CartState};
use storefront::model::{CartRow, ProductSize, ProductVariant};
use storefront::{CartLineItem, CartStore, LineKey, Session, SessionHandle, StorefrontResult, TracingNotifier};
use tokio::runtime::Runtime; // To run async code within Criterion

// --- Helpers ---
fn line(i: u64) -> CartLineItem {
  let variant = ProductVariant {
    id: i,
    price: 1.0 + (i % 97) as f64 * 0.37,
    stock: Some(20),
    color: None,
    images: vec![],
    product: None,
  };
  let size = (i % 3 == 0).then(|| ProductSize { id: i % 5, label: "M".into() });
  CartLineItem::new(i, variant, size, (i % 4 + 1) as u32, Some(i % 2 == 0))
}

fn cart(lines: u64) -> CartState {
  CartState::with_items((0..lines).map(line).collect())
}

// Answers immediately so the benchmark measures the store, not I/O.
struct InstantApi;

#[async_trait::async_trait]
impl storefront::remote::CartService for InstantApi {
  async fn list_cart(&self) -> StorefrontResult<Vec<CartRow>> {
    Ok(
      (0..100)
        .map(|i| CartRow { id: i, variant: i, size: None, quantity: 1, checked: Some(true) })
        .collect(),
    )
  }
  async fn add_to_cart(&self, _line: &storefront::remote::AddToCart) -> StorefrontResult<()> {
    Ok(())
  }
  async fn remove_from_cart(&self, _key: LineKey) -> StorefrontResult<()> {
    Ok(())
  }
  async fn update_cart_line(&self, _key: LineKey, _quantity: u32, _checked: bool) -> StorefrontResult<()> {
    Ok(())
  }
  async fn update_cart_checked(&self, _key: LineKey, _checked: bool) -> StorefrontResult<()> {
    Ok(())
  }
  async fn empty_cart(&self) -> StorefrontResult<()> {
    Ok(())
  }
}

#[async_trait::async_trait]
impl storefront::remote::CatalogService for InstantApi {
  async fn variant(&self, variant_id: u64) -> StorefrontResult<ProductVariant> {
    Ok(line(variant_id).variant)
  }
  async fn size(&self, size_id: u64) -> StorefrontResult<ProductSize> {
    Ok(ProductSize { id: size_id, label: "M".into() })
  }
  async fn product(&self, product_id: u64) -> StorefrontResult<storefront::Product> {
    Err(anyhow::anyhow!("no product {}", product_id).into())
  }
  async fn category(&self, category_id: u64) -> StorefrontResult<storefront::model::Category> {
    Err(anyhow::anyhow!("no category {}", category_id).into())
  }
  async fn products_in_category(&self, _category_id: u64) -> StorefrontResult<Vec<storefront::Product>> {
    Ok(vec![])
  }
  async fn products_in_sub_category(&self, _sub_category_id: u64) -> StorefrontResult<Vec<storefront::Product>> {
    Ok(vec![])
  }
}

// --- Benchmark Functions ---

fn bench_recalculate_totals(c: &mut Criterion) {
  let mut group = c.benchmark_group("RecalculateTotals");
  for lines in [10u64, 100, 1_000].iter() {
    group.throughput(Throughput::Elements(*lines));
    group.bench_with_input(BenchmarkId::from_parameter(lines), lines, |b, &lines| {
      let mut state = cart(lines);
      b.iter(|| state.recalculate_totals());
    });
  }
  group.finish();
}

fn bench_reduce_set_checked(c: &mut Criterion) {
  let mut group = c.benchmark_group("ReduceSetChecked");
  for lines in [10u64, 100, 1_000].iter() {
    group.bench_with_input(BenchmarkId::from_parameter(lines), lines, |b, &lines| {
      let mut state = cart(lines);
      let key = state.items[state.items.len() / 2].key();
      let mut checked = false;
      b.iter(|| {
        checked = !checked;
        reduce(&mut state, CartAction::SetChecked { key, checked });
      });
    });
  }
  group.finish();
}

fn bench_store_optimistic_update(c: &mut Criterion) {
  let mut group = c.benchmark_group("StoreOptimisticUpdate");
  let rt = Runtime::new().unwrap();
  let api = Arc::new(InstantApi);
  let store = CartStore::new(
    api.clone(),
    api,
    SessionHandle::signed_in(Session::new(1, "bench")),
    Arc::new(TracingNotifier),
  );
  rt.block_on(store.fetch()).unwrap();

  let store = &store;
  group.bench_function("update_quantity", |b| {
    let mut quantity = 1;
    b.to_async(&rt).iter(move || {
      quantity = quantity % 9 + 1;
      store.update_quantity(0, None, quantity, true)
    });
  });
  group.finish();
}

criterion_group!(
  benches,
  bench_recalculate_totals,
  bench_reduce_set_checked,
  bench_store_optimistic_update
);
criterion_main!(benches);
