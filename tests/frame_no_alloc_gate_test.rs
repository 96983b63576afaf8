use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use icosa::term::{encode_frame_into, frame_capacity, FramePipeline};
use icosa::types::Geometry;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn frame_pipeline_is_allocation_free_after_warmup() {
    let g = Geometry::new(160, 48).unwrap();
    let mut pipeline = FramePipeline::new(g).unwrap();
    let mut out = Vec::with_capacity(frame_capacity(g));

    // Warm-up.
    pipeline.advance();
    out.clear();
    encode_frame_into(pipeline.dots(), pipeline.floor(), &mut out).unwrap();

    let allocs = with_alloc_counting(|| {
        for _ in 0..300 {
            pipeline.advance();
            out.clear();
            encode_frame_into(pipeline.dots(), pipeline.floor(), &mut out).unwrap();
        }
    });

    assert!(allocs == 0);
}
