use divan::Bencher;
use primbench_mem::shared::{
    fixture, ArcSwapMap, AtomicPtrMap, ParkingLotRwLockMap, SharedMap, StdRwLockMap,
};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

/// Every thread reads key 1 from the same map.
#[divan::bench(
    types = [AtomicPtrMap, ArcSwapMap, ParkingLotRwLockMap, StdRwLockMap],
    threads = [1, 0],
)]
fn parallel_read<S: SharedMap>(bencher: Bencher) {
    let shared = S::new(fixture());
    bencher.bench(|| shared.get(divan::black_box(1)));
}

fn main() {
    divan::main();
}
