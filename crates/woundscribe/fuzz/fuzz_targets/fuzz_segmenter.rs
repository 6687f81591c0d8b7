//! Fuzz target for the document segmenter.
//!
//! Checks that segmentation never panics and that the documents it returns
//! always cover every page exactly once, in order.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use woundscribe::DocumentSegmenter;

#[derive(Arbitrary, Debug)]
struct Input {
    pages: Vec<String>,
}

fuzz_target!(|input: Input| {
    if input.pages.len() > 256 {
        return;
    }

    let documents = DocumentSegmenter::new().segment(&input.pages);

    let covered: Vec<usize> = documents
        .iter()
        .flat_map(|d| d.pages().iter().copied())
        .collect();
    let expected: Vec<usize> = (0..input.pages.len()).collect();
    assert_eq!(covered, expected);
    assert!(documents.iter().all(|d| d.page_count() > 0));
});
