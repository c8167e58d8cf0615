/*
 *  Copyright (c) 2021 Works Applications Co., Ltd.
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

extern crate sudachi;

use std::ops::Deref;

use futures::executor::block_on_stream;
use futures::stream as fstream;

use sudachi::analysis::stream::SentenceStream;
use sudachi::error::SudachiResult;
use sudachi::prelude::Mode;

mod common;
use crate::common::TestStatefulTokenizer;

#[test]
fn empty_source_yields_nothing() {
    let dict = TestStatefulTokenizer::new_built(Mode::C).tok.dict_clone();
    let source = fstream::iter(Vec::<SudachiResult<String>>::new());
    let stream = SentenceStream::new(dict, Mode::C, source);
    let mut iter = block_on_stream(stream);
    assert!(iter.next().is_none());
}

#[test]
fn single_chunk_two_sentences() {
    let dict = TestStatefulTokenizer::new_built(Mode::C).tok.dict_clone();
    let source = fstream::iter(vec![Ok("京都。京都。".to_owned())]);
    let stream = SentenceStream::new(dict, Mode::C, source);
    let results: Vec<_> = block_on_stream(stream).collect::<Result<_, _>>().unwrap();
    assert_eq!(results.len(), 2);
    for ms in &results {
        assert_eq!("京都", ms.get(0).surface().deref());
    }
}

#[test]
fn sentence_split_across_chunk_boundary() {
    let dict = TestStatefulTokenizer::new_built(Mode::C).tok.dict_clone();
    // the terminator arrives in a chunk separate from the rest of the sentence
    let source = fstream::iter(vec![Ok("京都".to_owned()), Ok("。".to_owned())]);
    let stream = SentenceStream::new(dict, Mode::C, source);
    let results: Vec<_> = block_on_stream(stream).collect::<Result<_, _>>().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!("京都。", results[0].surface().deref());
}

#[test]
fn trailing_chunk_without_terminator_is_flushed() {
    let dict = TestStatefulTokenizer::new_built(Mode::C).tok.dict_clone();
    let source = fstream::iter(vec![Ok("京都。京都".to_owned())]);
    let stream = SentenceStream::new(dict, Mode::C, source);
    let results: Vec<_> = block_on_stream(stream).collect::<Result<_, _>>().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!("京都。", results[0].surface().deref());
    assert_eq!("京都", results[1].surface().deref());
}
