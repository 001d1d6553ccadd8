use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use blockfall::core::{GameSession, GameSnapshot};
use blockfall::scores::{Leaderboard, ScoreRecord};
use blockfall::term::{FrameBuffer, GameView, ScoreBoardView, Viewport};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
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
fn term_game_view_render_is_allocation_free_after_warmup() {
    let view = GameView::default();
    let viewport = Viewport::new(80, 30);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    let mut board = Leaderboard::new();
    board.insert(ScoreRecord::new("ada", 1200));
    let scores = ScoreBoardView {
        leaderboard: &board,
        last_rank: Some(0),
    };

    let mut session = GameSession::with_seed(1);
    session.start();
    let mut snap = GameSnapshot::default();

    // Warm-up (resize/initial clears).
    session.snapshot_into(&mut snap);
    view.render_into(&snap, Some(&scores), viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for i in 0..200 {
            let dx = if (i / 8) % 2 == 0 { 1 } else { -1 };
            session.try_move(dx, 0);
            session.snapshot_into(&mut snap);
            view.render_into(&snap, Some(&scores), viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}
