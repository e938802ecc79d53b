use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use layers::{GlobeView, Viewport};
use scene::{FeatureCollection, FeatureGeometry, GeoFeature, LonLat, Metric, MobilityRecord};

struct CountingAllocator;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

fn count() {
    let _ = ALLOCATIONS.try_with(|n| n.set(n.get() + 1));
}

fn allocations() -> usize {
    ALLOCATIONS.with(Cell::get)
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        count();
        unsafe { System.alloc(layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        count();
        unsafe { System.alloc_zeroed(layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        count();
        unsafe { System.realloc(ptr, layout, new_size) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn square(lon: f64, lat: f64, code: &str) -> GeoFeature {
    let ring = vec![
        LonLat::new(lon - 3.0, lat - 3.0),
        LonLat::new(lon + 3.0, lat - 3.0),
        LonLat::new(lon + 3.0, lat + 3.0),
        LonLat::new(lon - 3.0, lat + 3.0),
        LonLat::new(lon - 3.0, lat - 3.0),
    ];
    let record = MobilityRecord::new(code, code).with(Metric::Retail, lon);
    GeoFeature::new(FeatureGeometry::Polygon(vec![ring]), record)
}

#[test]
fn drag_moves_do_not_allocate_once_warm() {
    let features = (0..10)
        .map(|i| {
            let lon = -27.0 + 6.0 * i as f64;
            square(lon, if i % 2 == 0 { 8.0 } else { -8.0 }, &format!("C{i}"))
        })
        .collect();
    let mut view = GlobeView::default();
    view.resize(Viewport::new(960.0, 600.0));
    view.set_features(FeatureCollection::new(features));
    view.drag_start();
    assert!(view.drag_move(1.0, 0.0));

    let before = allocations();
    assert!(view.drag_move(1.0, 0.0));
    assert!(view.drag_move(0.0, 1.0));
    assert_eq!(allocations() - before, 0);
}
