//! Paging rules
//!
//! バックエンドの画像ストアは固定サイズのページに分割されているものとして扱います。
//! ここではページ数の計算と、次に読み込むページの決定（ラップアラウンドを含む）を
//! 副作用のない関数として定義します。

use utsushie_shared::random::RandomSource;

use super::entity::PagePlan;

/// Page move requested relative to the currently loaded page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageTransition {
    #[default]
    Stay,
    Previous,
    Next,
}

impl PageTransition {
    /// Candidate page index, possibly out of range.
    pub fn apply(self, page: u64) -> i64 {
        let page = page as i64;
        match self {
            Self::Stay => page,
            Self::Previous => page - 1,
            Self::Next => page + 1,
        }
    }
}

/// Number of pages needed to hold `count` pictures.
pub fn total_pages(count: u64, page_size: usize) -> u64 {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size as u64)
}

/// Decide which page to load.
///
/// Unread pictures always surface first: while any are left, page 0 is forced
/// and the page count only covers the unread ones. Otherwise a room seen for
/// the first time (`current_page == None`) starts on a random page, and a
/// transition past either end wraps around.
pub fn plan_pages(
    unread_count: u64,
    total_count: u64,
    page_size: usize,
    current_page: Option<u64>,
    transition: PageTransition,
    random: &dyn RandomSource,
) -> PagePlan {
    if unread_count > 0 {
        return PagePlan {
            page: 0,
            total_pages: total_pages(unread_count, page_size),
            unread_count,
            total_count,
        };
    }

    let total_pages = total_pages(total_count, page_size);
    let page = match current_page {
        None => random_page(total_pages, random),
        Some(current) => wrap_page(transition.apply(current), total_pages),
    };

    PagePlan {
        page,
        total_pages,
        unread_count,
        total_count,
    }
}

fn random_page(total_pages: u64, random: &dyn RandomSource) -> u64 {
    let page = (random.next_unit() * total_pages as f64).floor() as u64;
    page.min(total_pages.saturating_sub(1))
}

fn wrap_page(candidate: i64, total_pages: u64) -> u64 {
    // empty folder: the only page is 0
    if total_pages == 0 {
        return 0;
    }
    if candidate < 0 {
        total_pages - 1
    } else if candidate as u64 >= total_pages {
        0
    } else {
        candidate as u64
    }
}
