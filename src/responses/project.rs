//! Index projection over paginated entity data.
//!
//! Given the entity pages of a cache, this derives the index records that go
//! into the cache's `index/` pages. Each record is tagged with the number of
//! the entity page it was projected from, which is exactly the page a peer
//! must fetch to get the full record.

use crate::wire::envelope::Response;
use crate::wire::indexes::{
    BoardIndex, KeyIndex, PostIndex, ThreadIndex, TruststateIndex, VoteIndex,
};

/// Projects the index form of every entity in the given pages into one
/// bundle, preserving page order and in-page order.
///
/// Addresses are not projected: the address entity is its own index.
pub fn project_indexes(entity_pages: &[Response]) -> Response {
    let mut out = Response::default();
    for (page_number, page) in entity_pages.iter().enumerate() {
        for board in &page.boards {
            out.board_indexes
                .push(BoardIndex::from_entity(board, page_number));
        }
        for thread in &page.threads {
            out.thread_indexes
                .push(ThreadIndex::from_entity(thread, page_number));
        }
        for post in &page.posts {
            out.post_indexes
                .push(PostIndex::from_entity(post, page_number));
        }
        for vote in &page.votes {
            out.vote_indexes
                .push(VoteIndex::from_entity(vote, page_number));
        }
        for key in &page.keys {
            out.key_indexes.push(KeyIndex::from_entity(key, page_number));
        }
        for truststate in &page.truststates {
            out.truststate_indexes
                .push(TruststateIndex::from_entity(truststate, page_number));
        }
    }
    out
}
