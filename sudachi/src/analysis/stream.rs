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

//! Async sentence-at-a-time tokenization over a chunked text source.
//!
//! [`SentenceStream`] pulls chunks from an asynchronous source, buffers them,
//! and hands each completed sentence to a [`StatefulTokenizer`] as soon as the
//! [`SentenceDetector`] finds a boundary. Output order is FIFO relative to the
//! input: a sentence is only emitted once every byte before it has been
//! consumed from the source.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;

use crate::analysis::stateful_tokenizer::StatefulTokenizer;
use crate::analysis::stateless_tokenizer::DictionaryAccess;
use crate::analysis::Mode;
use crate::error::SudachiResult;
use crate::prelude::MorphemeList;
use crate::sentence_detector::{NonBreakChecker, SentenceDetector};

/// Tokenizes sentences lazily as they arrive from an async chunk source.
///
/// The stream checks the source for cancellation only in between completed
/// sentences — never in the middle of a Viterbi pass — so dropping or
/// stopping iteration is always safe at a sentence boundary.
pub struct SentenceStream<D, S> {
    dict: D,
    source: S,
    source_done: bool,
    buffer: String,
    detector: SentenceDetector,
    use_checker: bool,
    tokenizer: StatefulTokenizer<D>,
    result: MorphemeList<D>,
}

impl<D, S> SentenceStream<D, S>
where
    D: DictionaryAccess + Clone,
{
    /// Creates a stream tokenizing chunks pulled from `source` in `mode`.
    pub fn new(dict: D, mode: Mode, source: S) -> Self {
        Self {
            result: MorphemeList::empty(dict.clone()),
            tokenizer: StatefulTokenizer::new(dict.clone(), mode),
            dict,
            source,
            source_done: false,
            buffer: String::new(),
            detector: SentenceDetector::new(),
            use_checker: true,
        }
    }

    /// Sets the maximum number of characters the sentence detector scans at once.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.detector = SentenceDetector::with_limit(limit);
        self
    }

    /// Disables the lexicon-backed non-break lookahead (§4.6); useful when the
    /// caller only needs rough sentence boundaries and not lexicon access.
    pub fn without_checker(mut self) -> Self {
        self.use_checker = false;
        self
    }

    fn emit_sentence(&mut self, len: usize) -> SudachiResult<MorphemeList<D>> {
        let sentence = self.buffer[..len].to_owned();
        self.buffer.drain(..len);
        self.tokenizer.reset().push_str(&sentence);
        self.tokenizer.do_tokenize()?;
        self.result.collect_results(&mut self.tokenizer)?;
        let empty = MorphemeList::empty(self.dict.clone());
        Ok(std::mem::replace(&mut self.result, empty))
    }
}

impl<D, S> Stream for SentenceStream<D, S>
where
    D: DictionaryAccess + Clone + Unpin,
    S: Stream<Item = SudachiResult<String>> + Unpin,
{
    type Item = SudachiResult<MorphemeList<D>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if !this.buffer.is_empty() {
                let checker = if this.use_checker {
                    Some(NonBreakChecker::new(this.dict.lexicon()))
                } else {
                    None
                };
                let eos = match this.detector.get_eos(&this.buffer, checker.as_ref()) {
                    Ok(eos) => eos,
                    Err(e) => return Poll::Ready(Some(Err(e))),
                };

                if eos >= 0 {
                    return Poll::Ready(Some(this.emit_sentence(eos as usize)));
                }

                // Negative: either "no boundary yet, need more input" or
                // "hit the scan limit, forced a provisional cut" — the two
                // share a sign (see spec's Open Question on this protocol).
                // They are distinguished by comparing the magnitude to the
                // amount of buffered data: a forced cut is strictly shorter.
                let need = (-eos) as usize;
                if need < this.buffer.len() {
                    return Poll::Ready(Some(this.emit_sentence(need)));
                }

                if this.source_done {
                    let len = this.buffer.len();
                    return Poll::Ready(Some(this.emit_sentence(len)));
                }
            } else if this.source_done {
                return Poll::Ready(None);
            }

            match Pin::new(&mut this.source).poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => this.buffer.push_str(&chunk),
                Poll::Ready(Some(Err(e))) => return Poll::Ready(Some(Err(e))),
                Poll::Ready(None) => this.source_done = true,
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

// See `sudachi/tests/stream.rs` for end-to-end tests against a real
// (synthetic) dictionary — this module has no unit tests of its own since
// every useful scenario needs a lexicon-backed `DictionaryAccess`.
