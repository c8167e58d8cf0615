/*
 * Copyright (c) 2021 Works Applications Co., Ltd.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use nom::{bytes::complete::take, number::complete::le_u32};
use std::cmp;

use self::trie::Trie;
use self::word_id_table::WordIdTable;
use self::word_infos::{WordInfo, WordInfos};
use self::word_params::WordParams;
use crate::analysis::{Mode, Tokenize};
use crate::dic::subset::InfoSubset;
use crate::dic::word_id::WordId;
use crate::error::SudachiNomResult;
use crate::prelude::*;

pub mod trie;
pub mod word_id_table;
pub mod word_infos;
pub mod word_params;

/// Maximum number of dictionaries (one system + user dictionaries) that can be
/// combined together. DicId 0xf (15) is reserved for OOV and other special nodes.
pub const MAX_DICTIONARIES: usize = 15;

/// A single lookup result: the id of the matched word and the byte offset
/// (relative to the start of input, not to the lookup offset) where it ends.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct LexiconEntry {
    pub word_id: WordId,
    pub end: usize,
}

/// Dictionary lexicon
///
/// Contains trie, word_id, word_param, word_info
pub struct Lexicon<'a> {
    trie: Trie,
    word_id_table: WordIdTable<'a>,
    word_params: WordParams<'a>,
    word_infos: WordInfos<'a>,
    dic_id: u8,
}

impl<'a> Lexicon<'a> {
    const USER_DICT_COST_PER_MORPH: i32 = -20;

    pub fn new(
        buf: &[u8],
        original_offset: usize,
        has_synonym_group_ids: bool,
    ) -> SudachiResult<Lexicon> {
        let mut offset = original_offset;

        let (_rest, trie_size) = u32_parser(buf, offset)?;
        offset += 4;
        let (_rest, trie_array) = trie_array_parser(buf, offset, trie_size)?;
        let trie = Trie::new(trie_array, trie_size);
        offset += trie.total_size();

        let (_rest, word_id_table_size) = u32_parser(buf, offset)?;
        let word_id_table = WordIdTable::new(buf, word_id_table_size, offset + 4);
        offset += word_id_table.storage_size();

        let (_rest, word_params_size) = u32_parser(buf, offset)?;
        let word_params = WordParams::new(buf, word_params_size, offset + 4);
        offset += word_params.storage_size();

        let word_infos = WordInfos::new(buf, offset, word_params.size(), has_synonym_group_ids);

        Ok(Lexicon {
            trie,
            word_id_table,
            word_params,
            word_infos,
            dic_id: 0,
        })
    }

    /// `Lexicon::parse` is an alias for `new`, used by dictionary-level code which
    /// already knows the dictionary kind from the header.
    pub fn parse(
        buf: &[u8],
        original_offset: usize,
        has_synonym_group_ids: bool,
    ) -> SudachiResult<Lexicon> {
        Self::new(buf, original_offset, has_synonym_group_ids)
    }

    /// Sets the dictionary id embedded into WordIds produced by [`lookup`](Self::lookup).
    pub fn set_dic_id(&mut self, dic_id: u8) {
        self.dic_id = dic_id;
    }

    /// Returns an iterator of word ids and length of words that match given input
    pub fn lookup<'b>(&'b self, input: &'b [u8], offset: usize) -> impl Iterator<Item = LexiconEntry> + 'b {
        let dic_id = self.dic_id;
        self.trie
            .common_prefix_iterator(input, offset)
            .flat_map(move |e| {
                let end = e.end;
                self.word_id_table
                    .entries(e.word_id as usize)
                    .map(move |word_id| LexiconEntry {
                        word_id: WordId::new(dic_id, word_id),
                        end,
                    })
            })
    }

    /// Returns word_info for given word_id
    pub fn get_word_info(&self, word_id: u32) -> SudachiResult<WordInfo> {
        self.get_word_info_subset(word_id, InfoSubset::all())
    }

    /// Returns word_info for given word_id, reading only the requested subset of fields
    pub fn get_word_info_subset(&self, word_id: u32, subset: InfoSubset) -> SudachiResult<WordInfo> {
        self.word_infos.get_word_info(word_id, subset)
    }

    /// Returns word_param for given word_id
    pub fn get_word_param(&self, word_id: u32) -> SudachiResult<(i16, i16, i16)> {
        Ok(self.word_params.get_params(word_id))
    }

    /// update word_param cost based on current tokenizer
    pub fn update_cost<T: Tokenize>(&mut self, tokenizer: &T) -> SudachiResult<()> {
        for wid in 0..self.word_params.size() as u32 {
            if self.word_params.get_cost(wid) != std::i16::MIN {
                continue;
            }
            let surface = self
                .get_word_info_subset(wid, InfoSubset::SURFACE)?
                .surface()
                .to_owned();
            let ms = tokenizer.tokenize(&surface, Mode::C, false)?;
            let internal_cost = ms.get_internal_cost();
            let cost = internal_cost + Lexicon::USER_DICT_COST_PER_MORPH * ms.len() as i32;
            let cost = cmp::min(cost, std::i16::MAX as i32);
            let cost = cmp::max(cost, std::i16::MIN as i32);
            self.word_params.set_cost(wid, cost as i16);
        }

        Ok(())
    }

    pub fn size(&self) -> u32 {
        self.word_params.size()
    }
}

fn u32_parser(input: &[u8], offset: usize) -> SudachiNomResult<&[u8], u32> {
    nom::sequence::preceded(take(offset), le_u32)(input)
}

fn trie_array_parser(
    input: &[u8],
    offset: usize,
    trie_size: u32,
) -> SudachiNomResult<&[u8], Vec<u32>> {
    // TODO: copied? &[u32] from bytes without copy? Java: `bytes.asIntBuffer();`
    nom::sequence::preceded(take(offset), nom::multi::count(le_u32, trie_size as usize))(input)
}
