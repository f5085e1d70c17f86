/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use serde::{Deserialize, Serialize};

use super::consts::{DEFAULT_PAGE, DEFAULT_PAGE_DELTA};

/// Raw, unnormalized paging input as a client would send it. Absent or
/// non-positive values fall back to the defaults independently.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageRequest {
    pub delta: Option<i64>,
    pub page: Option<i64>,
}

impl PageRequest {
    pub fn new(delta: i64, page: i64) -> Self {
        PageRequest {
            delta: Some(delta),
            page: Some(page),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub delta: u64,
    pub current_page: u64,
    pub next_page: u64,
    pub num_pages: u64,
}

/// Slice window over an ordered result set, with the page metadata already
/// normalized against the total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub delta: u64,
    pub current_page: u64,
    pub next_page: u64,
    pub num_pages: u64,
    pub offset: u64,
}

pub fn normalize_delta(delta: Option<i64>) -> u64 {
    match delta {
        Some(delta) if delta > 0 => delta as u64,
        _ => DEFAULT_PAGE_DELTA,
    }
}

pub fn normalize_page(page: Option<i64>) -> u64 {
    match page {
        Some(page) if page > 0 => page as u64,
        _ => DEFAULT_PAGE,
    }
}

/// At least one page of metadata exists even for an empty set.
pub fn num_pages(total: u64, delta: u64) -> u64 {
    std::cmp::max(1, total.div_ceil(delta))
}

/// Normalizes the request against the total count. A page index past the
/// last page clamps to the last page; next_page is cyclic and wraps to the
/// first page from the last one.
pub fn window(request: PageRequest, total: u64) -> PageWindow {
    let delta = normalize_delta(request.delta);
    let num_pages = num_pages(total, delta);
    let current_page = std::cmp::min(normalize_page(request.page), num_pages);
    let next_page = if current_page < num_pages {
        current_page + 1
    } else {
        1
    };

    PageWindow {
        delta,
        current_page,
        next_page,
        num_pages,
        offset: (current_page - 1) * delta,
    }
}

impl PageWindow {
    pub fn finish<T>(self, results: Vec<T>) -> Page<T> {
        Page {
            results,
            delta: self.delta,
            current_page: self.current_page,
            next_page: self.next_page,
            num_pages: self.num_pages,
        }
    }
}

/// Paginates a fully materialized ordered set in memory.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let window = window(request, items.len() as u64);

    let results = items
        .into_iter()
        .skip(window.offset as usize)
        .take(window.delta as usize)
        .collect();

    window.finish(results)
}
