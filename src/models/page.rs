use serde::{Deserialize, Serialize};

/// One page of a server-side paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.limit == 0 {
            return 0;
        }
        u32::try_from(self.total.div_ceil(self.limit as u64)).unwrap_or(u32::MAX)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// Client-side pagination over a list the server returns unpaged.
///
/// Pages are 1-based; page 0 is treated as page 1.
pub fn paginate<T: Clone>(items: &[T], page: u32, per_page: u32) -> Page<T> {
    let page = page.max(1);
    let data = if per_page == 0 {
        Vec::new()
    } else {
        let start = (page as usize - 1).saturating_mul(per_page as usize);
        items
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect()
    };

    Page {
        data,
        total: items.len() as u64,
        page,
        limit: per_page,
    }
}
