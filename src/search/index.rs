//! Per-partition full-text index.
//!
//! Each partition owns one in-RAM tantivy index with two fields: the raw
//! document key and the tokenized display name. Indexes are built once by a
//! [`TantivyIndexBuilder`] and are read-only afterwards.

use crate::error::Result;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, PhraseQuery, Query, RegexQuery, TermQuery};
use tantivy::schema::document::TantivyDocument;
use tantivy::schema::{Field, IndexRecordOption, STORED, STRING, Schema, TEXT, Value};
use tantivy::tokenizer::TokenStream;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, Term, doc};

const WRITER_HEAP_BYTES: usize = 15_000_000;

/// Query forms supported by the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Contiguous phrase match against the indexed name.
    Phrase(String),
    /// Every token must occur as a substring of some indexed term.
    Conjunction(Vec<String>),
}

/// A single search hit: the document key and the text it was indexed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub doc_id: String,
    pub text: String,
}

pub trait SearchIndex: Send + Sync {
    /// Runs `query`, returning at most `limit` hits in relevance order.
    fn search(&self, query: &SearchQuery, limit: usize) -> Result<Vec<Hit>>;

    /// Looks up the indexed text of one document.
    fn document(&self, doc_id: &str) -> Result<Option<String>>;

    fn doc_count(&self) -> u64;
}

pub struct TantivyIndexBuilder {
    index: Index,
    writer: IndexWriter,
    key_field: Field,
    name_field: Field,
}

impl TantivyIndexBuilder {
    pub fn new() -> Result<Self> {
        let mut builder = Schema::builder();
        let key_field = builder.add_text_field("key", STRING | STORED);
        let name_field = builder.add_text_field("name", TEXT | STORED);
        let schema = builder.build();

        let index = Index::create_in_ram(schema);
        let writer: IndexWriter = index.writer_with_num_threads(1, WRITER_HEAP_BYTES)?;

        Ok(Self {
            index,
            writer,
            key_field,
            name_field,
        })
    }

    /// Indexes `value` under `key`, replacing any earlier document with that key.
    pub fn index(&mut self, key: &str, value: &str) -> Result<()> {
        self.writer
            .delete_term(Term::from_field_text(self.key_field, key));
        self.writer.add_document(doc!(
            self.key_field => key.to_string(),
            self.name_field => value.to_string(),
        ))?;
        Ok(())
    }

    pub fn build(mut self) -> Result<TantivyIndex> {
        self.writer.commit()?;
        let reader: IndexReader = self
            .index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        Ok(TantivyIndex {
            index: self.index,
            reader,
            key_field: self.key_field,
            name_field: self.name_field,
        })
    }
}

pub struct TantivyIndex {
    index: Index,
    reader: IndexReader,
    key_field: Field,
    name_field: Field,
}

impl TantivyIndex {
    /// Runs `text` through the name field's analyzer.
    fn name_terms(&self, text: &str) -> Result<Vec<Term>> {
        let mut analyzer = self.index.tokenizer_for_field(self.name_field)?;
        let mut stream = analyzer.token_stream(text);
        let mut terms = Vec::new();
        while stream.advance() {
            terms.push(Term::from_field_text(self.name_field, &stream.token().text));
        }
        Ok(terms)
    }

    fn build_query(&self, query: &SearchQuery) -> Result<Option<Box<dyn Query>>> {
        match query {
            SearchQuery::Phrase(text) => {
                let mut terms = self.name_terms(text)?;
                match terms.len() {
                    0 => Ok(None),
                    1 => Ok(Some(Box::new(TermQuery::new(
                        terms.remove(0),
                        IndexRecordOption::Basic,
                    )))),
                    _ => Ok(Some(Box::new(PhraseQuery::new(terms)))),
                }
            }
            SearchQuery::Conjunction(tokens) => {
                let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::with_capacity(tokens.len());
                for token in tokens.iter().filter(|t| !t.is_empty()) {
                    let pattern = format!(".*{}.*", regex::escape(&token.to_lowercase()));
                    let clause = RegexQuery::from_pattern(&pattern, self.name_field)?;
                    clauses.push((Occur::Must, Box::new(clause)));
                }
                if clauses.is_empty() {
                    return Ok(None);
                }
                Ok(Some(Box::new(BooleanQuery::new(clauses))))
            }
        }
    }

    fn stored_text(&self, doc: &TantivyDocument, field: Field) -> String {
        doc.get_first(field)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }
}

impl SearchIndex for TantivyIndex {
    fn search(&self, query: &SearchQuery, limit: usize) -> Result<Vec<Hit>> {
        let Some(query) = self.build_query(query)? else {
            return Ok(Vec::new());
        };

        let searcher = self.reader.searcher();
        let top_docs = searcher.search(&query, &TopDocs::with_limit(limit.max(1)))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (_score, address) in top_docs {
            let doc = searcher.doc::<TantivyDocument>(address)?;
            hits.push(Hit {
                doc_id: self.stored_text(&doc, self.key_field),
                text: self.stored_text(&doc, self.name_field),
            });
        }
        Ok(hits)
    }

    fn document(&self, doc_id: &str) -> Result<Option<String>> {
        let searcher = self.reader.searcher();
        let query = TermQuery::new(
            Term::from_field_text(self.key_field, doc_id),
            IndexRecordOption::Basic,
        );
        let top_docs = searcher.search(&query, &TopDocs::with_limit(1))?;

        match top_docs.first() {
            Some((_score, address)) => {
                let doc = searcher.doc::<TantivyDocument>(*address)?;
                Ok(Some(self.stored_text(&doc, self.name_field)))
            }
            None => Ok(None),
        }
    }

    fn doc_count(&self) -> u64 {
        self.reader.searcher().num_docs()
    }
}
