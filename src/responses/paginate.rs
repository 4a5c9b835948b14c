//! Splitting result bundles into fixed-size pages.
//!
//! Each populated slice of a [`Response`] is paginated independently with its
//! own configured page size, producing pages that carry exactly one kind.
//! The page count is always `len / size + 1`: when the length is an exact
//! multiple of the size the final page is empty. Peer implementations count
//! on that trailing page, so it is part of the wire contract.

use crate::config::PageSizes;
use crate::wire::envelope::Response;

/// Splits a slice into `len / page_size + 1` chunks of at most `page_size`.
///
/// The page size must be positive. Concatenating the chunks in order
/// reproduces the input; an exact-multiple length yields a trailing empty
/// chunk.
pub fn pages_of<T: Clone>(items: &[T], page_size: usize) -> Vec<Vec<T>> {
    let num_pages = items.len() / page_size + 1;
    (0..num_pages)
        .map(|i| {
            let beg = i * page_size;
            let end = ((i + 1) * page_size).min(items.len());
            items[beg..end].to_vec()
        })
        .collect()
}

/// Paginates one slice into single-kind pages appended onto `pages`.
/// Unpopulated slices produce nothing.
fn append_pages<T: Clone>(
    items: &[T],
    page_size: usize,
    pages: &mut Vec<Response>,
    fill: impl Fn(&mut Response, Vec<T>),
) {
    if items.is_empty() {
        return;
    }
    for chunk in pages_of(items, page_size) {
        let mut page = Response::default();
        fill(&mut page, chunk);
        pages.push(page);
    }
}

/// Splits a full result bundle into single-kind pages.
///
/// All fourteen slices are considered, walked in the fixed wire order. An
/// entirely empty bundle still produces one empty page, so callers can rely
/// on at least one page existing.
pub fn paginate_entities(full: &Response, sizes: &PageSizes) -> Vec<Response> {
    let mut pages = Vec::new();
    append_pages(&full.boards, sizes.boards, &mut pages, |p, c| p.boards = c);
    append_pages(&full.board_indexes, sizes.board_indexes, &mut pages, |p, c| {
        p.board_indexes = c
    });
    append_pages(&full.threads, sizes.threads, &mut pages, |p, c| {
        p.threads = c
    });
    append_pages(
        &full.thread_indexes,
        sizes.thread_indexes,
        &mut pages,
        |p, c| p.thread_indexes = c,
    );
    append_pages(&full.posts, sizes.posts, &mut pages, |p, c| p.posts = c);
    append_pages(&full.post_indexes, sizes.post_indexes, &mut pages, |p, c| {
        p.post_indexes = c
    });
    append_pages(&full.votes, sizes.votes, &mut pages, |p, c| p.votes = c);
    append_pages(&full.vote_indexes, sizes.vote_indexes, &mut pages, |p, c| {
        p.vote_indexes = c
    });
    append_pages(&full.addresses, sizes.addresses, &mut pages, |p, c| {
        p.addresses = c
    });
    append_pages(
        &full.address_indexes,
        sizes.address_indexes,
        &mut pages,
        |p, c| p.address_indexes = c,
    );
    append_pages(&full.keys, sizes.keys, &mut pages, |p, c| p.keys = c);
    append_pages(&full.key_indexes, sizes.key_indexes, &mut pages, |p, c| {
        p.key_indexes = c
    });
    append_pages(&full.truststates, sizes.truststates, &mut pages, |p, c| {
        p.truststates = c
    });
    append_pages(
        &full.truststate_indexes,
        sizes.truststate_indexes,
        &mut pages,
        |p, c| p.truststate_indexes = c,
    );
    if pages.is_empty() {
        pages.push(Response::default());
    }
    pages
}

/// Splits an index bundle into single-kind pages.
///
/// Same behavior as [`paginate_entities`] restricted to the seven index
/// slices.
pub fn paginate_indexes(full: &Response, sizes: &PageSizes) -> Vec<Response> {
    let mut pages = Vec::new();
    append_pages(&full.board_indexes, sizes.board_indexes, &mut pages, |p, c| {
        p.board_indexes = c
    });
    append_pages(
        &full.thread_indexes,
        sizes.thread_indexes,
        &mut pages,
        |p, c| p.thread_indexes = c,
    );
    append_pages(&full.post_indexes, sizes.post_indexes, &mut pages, |p, c| {
        p.post_indexes = c
    });
    append_pages(&full.vote_indexes, sizes.vote_indexes, &mut pages, |p, c| {
        p.vote_indexes = c
    });
    append_pages(
        &full.address_indexes,
        sizes.address_indexes,
        &mut pages,
        |p, c| p.address_indexes = c,
    );
    append_pages(&full.key_indexes, sizes.key_indexes, &mut pages, |p, c| {
        p.key_indexes = c
    });
    append_pages(
        &full.truststate_indexes,
        sizes.truststate_indexes,
        &mut pages,
        |p, c| p.truststate_indexes = c,
    );
    if pages.is_empty() {
        pages.push(Response::default());
    }
    pages
}
