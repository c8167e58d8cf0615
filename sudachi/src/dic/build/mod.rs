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

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use crate::dic::build::cost::CostBuffer;
use crate::dic::build::error::{BuildFailure, DicCompilationCtx};
use crate::dic::build::index::IndexBuilder;
use crate::dic::build::lexicon::{LexiconReader, LexiconWriter, RawLexiconEntry};
use crate::dic::build::report::{DictPartReport, ReportBuilder, Reporter};
use crate::dic::build::resolve::{BuiltDictResolver, BuiltDictionary, ChainedResolver, RawDictResolver};
use crate::dic::header::{Header, HeaderVersion, UserDictVersion};
use crate::dic::word_id::WordId;
use crate::error::SudachiResult;

pub mod cost;
pub mod error;
pub(crate) mod index;
pub(crate) mod lexicon;
pub(crate) mod parse;
pub(crate) mod primitives;
pub(crate) mod read_raw;
pub mod report;
pub(crate) mod resolve;

const MAX_POS_IDS: usize = i16::MAX as usize;
const MAX_DIC_STRING_LEN: usize = MAX_POS_IDS;
const MAX_ARRAY_LEN: usize = i8::MAX as usize;

/// A value accepted by [`DictBuilder::read_conn`].
///
/// Implemented for `&Path` (reads the connection matrix from a file) and for
/// `&[u8]` (reads it from an in-memory buffer, e.g. `include_bytes!`).
pub trait ConnSource {
    fn read_into(self, buf: &mut CostBuffer) -> SudachiResult<()>;
}

impl ConnSource for &Path {
    fn read_into(self, buf: &mut CostBuffer) -> SudachiResult<()> {
        let file = File::open(self)?;
        buf.read(BufReader::new(file))
    }
}

impl ConnSource for &[u8] {
    fn read_into(self, buf: &mut CostBuffer) -> SudachiResult<()> {
        buf.read(self)
    }
}

/// A value accepted by [`DictBuilder::read_lexicon`].
///
/// Implemented for `&Path` (reads the lexicon CSV from a file) and for
/// `&[u8]` (reads it from an in-memory buffer, e.g. `include_bytes!`).
pub trait LexSource {
    fn read_into(self, reader: &mut LexiconReader) -> SudachiResult<usize>;
}

impl LexSource for &Path {
    fn read_into(self, reader: &mut LexiconReader) -> SudachiResult<usize> {
        reader.read_file(self)
    }
}

impl LexSource for &[u8] {
    fn read_into(self, reader: &mut LexiconReader) -> SudachiResult<usize> {
        reader.read_bytes(self)
    }
}

/// Compiles a system or user dictionary from CSV lexicon sources and,
/// for system dictionaries, a connection cost matrix.
///
/// A `DictBuilder<'a>` tied to a borrowed dictionary (via [`new_user`](Self::new_user))
/// keeps that borrow alive for as long as splits may reference it; a plain
/// [`new_system`](Self::new_system) builder has no such constraint.
pub struct DictBuilder<'a> {
    header: Header,
    conn: CostBuffer,
    lexicon: LexiconReader,
    reporter: Reporter,
    resolved: bool,
    is_user: bool,
    dict_resolver: Option<Box<dyn lexicon::SplitUnitResolver + 'a>>,
}

impl DictBuilder<'static> {
    /// Creates a builder for a system dictionary.
    pub fn new_system() -> Self {
        Self {
            header: Header::new(),
            conn: CostBuffer::new(),
            lexicon: LexiconReader::new(),
            reporter: Reporter::new(),
            resolved: false,
            is_user: false,
            dict_resolver: None,
        }
    }

    /// Alias of [`new_system`](Self::new_system).
    pub fn new() -> Self {
        Self::new_system()
    }
}

impl<'a> DictBuilder<'a> {
    /// Creates a builder for a user dictionary, based on an already compiled
    /// dictionary it is going to be used together with.
    ///
    /// Part-of-speech entries already present in `dict` are reused so that
    /// inline splits can reference system words; any new part-of-speech
    /// introduced by the user CSV is appended after them.
    pub fn new_user<D: BuiltDictionary + 'a>(dict: &'a D) -> DictBuilder<'a> {
        let mut lexicon = LexiconReader::new();
        lexicon.preload_pos(dict.grammar());
        lexicon.set_num_system_words(dict.lexicon().size() as usize);
        let conn = dict.grammar().conn_matrix();
        lexicon.set_max_conn_sizes(conn.num_left() as i16, conn.num_right() as i16);

        let mut header = Header::new();
        header.version = HeaderVersion::UserDict(UserDictVersion::Version3);

        DictBuilder {
            header,
            conn: CostBuffer::new(),
            lexicon,
            reporter: Reporter::new(),
            resolved: false,
            is_user: true,
            dict_resolver: Some(Box::new(BuiltDictResolver::new(dict))),
        }
    }

    /// Sets the description string embedded into the dictionary header.
    pub fn set_description(&mut self, description: String) {
        self.header.description = description;
    }

    /// Reads the connection cost matrix. Only meaningful for system dictionaries.
    pub fn read_conn<S: ConnSource>(&mut self, src: S) -> SudachiResult<()> {
        src.read_into(&mut self.conn)?;
        self.lexicon
            .set_max_conn_sizes(self.conn.left(), self.conn.right());
        Ok(())
    }

    /// Reads a single lexicon CSV source, returning the number of entries read.
    ///
    /// Can be called multiple times to merge several CSV files into one dictionary.
    pub fn read_lexicon<S: LexSource>(&mut self, src: S) -> SudachiResult<usize> {
        src.read_into(&mut self.lexicon)
    }

    /// Resolves inline word splits (`surface,pos,...` references in the split
    /// columns) into concrete word ids and validates all entries.
    ///
    /// Idempotent: callers may call this explicitly before [`compile`](Self::compile),
    /// which also calls it, without doing the work twice.
    pub fn resolve(&mut self) -> SudachiResult<()> {
        if self.resolved {
            return Ok(());
        }

        if self.lexicon.needs_split_resolution() {
            // entries() is borrowed immutably by the resolver below while
            // resolve_splits() needs &mut self.lexicon; the resolver only
            // ever reads surfaces of already-parsed entries, never the
            // split fields being mutated, so this mirrors the same
            // workaround lexicon.rs uses internally for the same reason.
            let entries_ptr: *const [RawLexiconEntry] = self.lexicon.entries();
            let entries: &[RawLexiconEntry] = unsafe { &*entries_ptr };
            let raw = RawDictResolver::new(entries, self.is_user);

            let result = match &self.dict_resolver {
                Some(external) => {
                    let chained = ChainedResolver::new(external, &raw);
                    self.lexicon.resolve_splits(&chained)
                }
                None => self.lexicon.resolve_splits(&raw),
            };

            if let Err((split, line)) = result {
                let mut ctx = DicCompilationCtx::default();
                ctx.set_filename("<splits>".to_owned());
                ctx.set_line(line);
                return ctx.err(BuildFailure::InvalidSplit(split));
            }
        }

        self.lexicon.validate_entries()?;
        self.resolved = true;
        Ok(())
    }

    /// Writes the grammar block (part-of-speech table and connection matrix)
    /// of a dictionary.
    pub(crate) fn write_grammar<W: Write>(&mut self, w: &mut W) -> SudachiResult<usize> {
        let mut written = self.lexicon.write_pos_table(w)?;

        if self.is_user {
            // user dictionaries do not carry their own connection matrix
            w.write_all(&0i16.to_le_bytes())?;
            w.write_all(&0i16.to_le_bytes())?;
            written += 4;
        } else {
            w.write_all(&self.conn.left().to_le_bytes())?;
            w.write_all(&self.conn.right().to_le_bytes())?;
            self.conn.write_to(w)?;
            written += 4 + self.conn.matrix().len();
        }

        Ok(written)
    }

    /// Writes the lexicon block (trie, word-id table, word parameters and word
    /// info) assuming it starts at the given absolute file offset.
    pub(crate) fn write_lexicon<W: Write>(
        &mut self,
        w: &mut W,
        offset: usize,
    ) -> SudachiResult<usize> {
        self.resolve()?;

        let dic_id: u8 = if self.is_user { 1 } else { 0 };
        let mut index = IndexBuilder::new();
        for (i, e) in self.lexicon.entries().iter().enumerate() {
            if e.should_index() {
                index.add(e.surface(), WordId::new(dic_id, i as u32));
            }
        }

        let rep = ReportBuilder::new("trie");
        let trie = index.build_trie()?;
        let trie_size = (trie.len() / 4) as u32;
        w.write_all(&trie_size.to_le_bytes())?;
        w.write_all(&trie)?;
        self.reporter.collect(trie.len() + 4, rep);
        let mut written = 4 + trie.len();

        let rep = ReportBuilder::new("word_id_table");
        let word_id_table = index.build_word_id_table()?;
        w.write_all(&(word_id_table.len() as u32).to_le_bytes())?;
        w.write_all(&word_id_table)?;
        self.reporter.collect(word_id_table.len() + 4, rep);
        written += 4 + word_id_table.len();

        let lexicon_offset = offset + written;
        let mut lw = LexiconWriter::new(self.lexicon.entries(), lexicon_offset, &mut self.reporter);
        written += lw.write(w)?;

        Ok(written)
    }

    /// Compiles the full binary dictionary (header, grammar and lexicon) and
    /// writes it to `w`.
    pub fn compile<W: Write>(&mut self, w: &mut W) -> SudachiResult<usize> {
        self.resolve()?;

        let mut written = self.header.write_to(w)?;
        written += self.write_grammar(w)?;
        written += self.write_lexicon(w, written)?;
        Ok(written)
    }

    /// Returns timing/size information about each part written so far.
    pub fn report(&self) -> &[DictPartReport] {
        self.reporter.reports()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dic::grammar::Grammar;
    use crate::dic::header::SystemDictVersion;
    use crate::dic::lexicon::{Lexicon, LexiconEntry};
    use crate::dic::DictionaryLoader;

    const MATRIX: &[u8] = b"2 2\n0 0 0\n0 1 -100\n1 0 200\n1 1 300\n";
    const ONE_WORD: &str =
        "京都,6,6,5293,京都,名詞,固有名詞,地名,一般,*,*,キョウト,京都,*,A,*,*,*\n";

    #[test]
    fn build_grammar() {
        let mut bldr = DictBuilder::new();
        bldr.read_conn(MATRIX).unwrap();
        assert_eq!(1, bldr.read_lexicon(ONE_WORD.as_bytes()).unwrap());
        let mut built = Vec::new();
        let written = bldr.write_grammar(&mut built).unwrap();
        assert_eq!(built.len(), written);
        let grammar = Grammar::parse(&built, 0).unwrap();
        assert_eq!(grammar.pos_list.len(), 1);
        assert_eq!(
            grammar.pos_list[0],
            &["名詞", "固有名詞", "地名", "一般", "*", "*"]
        );
        let conn = grammar.conn_matrix();
        assert_eq!(conn.num_left(), 2);
        assert_eq!(conn.num_right(), 2);
    }

    #[test]
    fn build_lexicon_1word() {
        let mut bldr = DictBuilder::new();
        assert_eq!(1, bldr.read_lexicon(ONE_WORD.as_bytes()).unwrap());
        let mut built = Vec::new();
        bldr.write_lexicon(&mut built, 0).unwrap();
        let mut lex = Lexicon::parse(&built, 0, true).unwrap();
        lex.set_dic_id(0);
        let mut iter = lex.lookup("京都".as_bytes(), 0);
        assert_eq!(
            iter.next(),
            Some(LexiconEntry {
                word_id: WordId::new(0, 0),
                end: 6
            })
        );
        assert_eq!(iter.next(), None);
        assert_eq!((6, 6, 5293), lex.get_word_param(0).unwrap());
        let wi = lex.get_word_info(0).unwrap();
        assert_eq!(wi.surface(), "京都");
        assert_eq!(wi.normalized_form(), "京都");
        assert_eq!(wi.dictionary_form(), "京都");
        assert_eq!(wi.reading_form(), "キョウト");
    }

    #[test]
    fn build_system_1word() {
        let mut bldr = DictBuilder::new();
        bldr.read_conn(MATRIX).unwrap();
        assert_eq!(1, bldr.read_lexicon(ONE_WORD.as_bytes()).unwrap());
        let mut built = Vec::new();
        bldr.compile(&mut built).unwrap();
        let dic = DictionaryLoader::read_dictionary(&built).unwrap();
        assert_eq!(
            dic.header.version,
            HeaderVersion::SystemDict(SystemDictVersion::Version2)
        );

        let dic = dic.to_loaded().unwrap();

        let entry = dic.lexicon().lookup("京都".as_bytes(), 0).next().unwrap();
        assert_eq!(entry.word_id, WordId::new(0, 0));
        let info = dic.lexicon().get_word_info(entry.word_id).unwrap();
        assert_eq!(info.surface(), "京都");
        assert_eq!(info.reading_form(), "キョウト");
    }

    #[test]
    fn build_system_3words() {
        let data = "東,6,6,1000,東,名詞,固有名詞,地名,一般,*,*,ヒガシ,東,*,A,*,*,*\n\
                     京,6,6,1000,京,名詞,固有名詞,地名,一般,*,*,キョウ,京,*,A,*,*,*\n\
                     東京,6,6,2000,東京,名詞,固有名詞,地名,一般,*,*,トウキョウ,東京,*,B,0/1,*,1/0\n";
        let mut bldr = DictBuilder::new();
        bldr.read_conn(MATRIX).unwrap();
        assert_eq!(3, bldr.read_lexicon(data.as_bytes()).unwrap());
        bldr.resolve().unwrap();
        let mut built = Vec::new();
        bldr.compile(&mut built).unwrap();
        let dic = DictionaryLoader::read_dictionary(&built).unwrap();
        let dic = dic.to_loaded().unwrap();

        let entry = dic.lexicon().lookup("東京".as_bytes(), 0).next().unwrap();
        assert_eq!(entry.word_id, WordId::new(0, 2));
        let info = dic.lexicon().get_word_info(entry.word_id).unwrap();
        assert_eq!(
            info.a_unit_split(),
            &[WordId::new(0, 0), WordId::new(0, 1)]
        );
    }
}
