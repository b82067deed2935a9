use std::sync::Arc;

use shared_types::{AppError, Precedent, PrecedentHit, PrecedentQuery};
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Schema, Value, STORED, STRING, TEXT};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use tokio::sync::OnceCell;
use uuid::Uuid;

/// Global precedent index, built from the database on first use.
static PRECEDENTS: OnceCell<Arc<PrecedentIndex>> = OnceCell::const_new();

/// Longest snippet shown under a hit, in characters (before the ellipsis).
pub const SNIPPET_CHARS: usize = 240;

const WRITER_MEMORY_BYTES: usize = 50_000_000;

struct PrecedentFields {
    id: Field,
    citation: Field,
    title: Field,
    court: Field,
    jurisdiction: Field,
    /// Lowercased jurisdiction for case-insensitive filtering.
    jurisdiction_key: Field,
    year: Field,
    summary: Field,
}

/// In-memory tantivy index over the precedent corpus.
pub struct PrecedentIndex {
    index: Index,
    reader: IndexReader,
    fields: PrecedentFields,
}

fn index_error(err: tantivy::TantivyError) -> AppError {
    tracing::error!(error = %err, "precedent index error");
    AppError::internal(format!("Precedent index error: {err}"))
}

impl PrecedentIndex {
    /// Create an empty in-RAM index.
    pub fn new() -> Result<Self, AppError> {
        let mut builder = Schema::builder();
        let fields = PrecedentFields {
            id: builder.add_text_field("id", STRING | STORED),
            citation: builder.add_text_field("citation", TEXT | STORED),
            title: builder.add_text_field("title", TEXT | STORED),
            court: builder.add_text_field("court", STORED),
            jurisdiction: builder.add_text_field("jurisdiction", STRING | STORED),
            jurisdiction_key: builder.add_text_field("jurisdiction_key", STRING),
            year: builder.add_i64_field("year", STORED),
            summary: builder.add_text_field("summary", TEXT | STORED),
        };
        let index = Index::create_in_ram(builder.build());
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(index_error)?;

        Ok(Self {
            index,
            reader,
            fields,
        })
    }

    /// Build an index holding exactly `precedents`.
    pub fn from_precedents(precedents: &[Precedent]) -> Result<Self, AppError> {
        let index = Self::new()?;
        index.rebuild(precedents)?;
        Ok(index)
    }

    /// Replace the indexed corpus with `precedents`.
    pub fn rebuild(&self, precedents: &[Precedent]) -> Result<(), AppError> {
        let f = &self.fields;
        let mut writer: IndexWriter = self.index.writer(WRITER_MEMORY_BYTES).map_err(index_error)?;
        writer.delete_all_documents().map_err(index_error)?;

        for p in precedents {
            writer
                .add_document(doc!(
                    f.id => p.id.to_string(),
                    f.citation => p.citation.as_str(),
                    f.title => p.title.as_str(),
                    f.court => p.court.as_str(),
                    f.jurisdiction => p.jurisdiction.as_str(),
                    f.jurisdiction_key => p.jurisdiction.trim().to_lowercase(),
                    f.year => i64::from(p.decided_year),
                    f.summary => p.summary.as_str(),
                ))
                .map_err(index_error)?;
        }

        writer.commit().map_err(index_error)?;
        self.reader.reload().map_err(index_error)?;
        tracing::info!(count = precedents.len(), "precedent index built");
        Ok(())
    }

    /// Number of indexed precedents.
    pub fn len(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ranked full-text search over citation, title and summary.
    pub fn search(&self, query: &PrecedentQuery) -> Vec<PrecedentHit> {
        let text = query.q.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let f = &self.fields;
        let parser = QueryParser::for_index(&self.index, vec![f.citation, f.title, f.summary]);
        let text_query: Box<dyn Query> = match parser.parse_query(text) {
            Ok(q) => q,
            Err(err) => {
                tracing::debug!(error = %err, query = text, "falling back to lenient parsing");
                let (q, _errors) = parser.parse_query_lenient(text);
                q
            }
        };

        let full_query: Box<dyn Query> = match query.jurisdiction_filter() {
            Some(jurisdiction) => {
                let term = Term::from_field_text(f.jurisdiction_key, &jurisdiction.to_lowercase());
                Box::new(BooleanQuery::new(vec![
                    (Occur::Must, text_query),
                    (
                        Occur::Must,
                        Box::new(TermQuery::new(term, IndexRecordOption::Basic)),
                    ),
                ]))
            }
            None => text_query,
        };

        let searcher = self.reader.searcher();
        let top_docs = match searcher.search(full_query.as_ref(), &TopDocs::with_limit(query.effective_limit())) {
            Ok(docs) => docs,
            Err(err) => {
                tracing::warn!(error = %err, "precedent search failed");
                return Vec::new();
            }
        };

        top_docs
            .into_iter()
            .filter_map(|(score, address)| {
                let doc: TantivyDocument = searcher.doc(address).ok()?;
                let precedent = self.to_precedent(&doc)?;
                let snippet = make_snippet(&precedent.summary, SNIPPET_CHARS);
                Some(PrecedentHit {
                    precedent,
                    score,
                    snippet,
                })
            })
            .collect()
    }

    fn to_precedent(&self, doc: &TantivyDocument) -> Option<Precedent> {
        let f = &self.fields;
        let text = |field: Field| {
            doc.get_first(field)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let id = Uuid::parse_str(&text(f.id)).ok()?;
        let year = doc.get_first(f.year).and_then(|v| v.as_i64()).unwrap_or(0);

        Some(Precedent {
            id,
            citation: text(f.citation),
            title: text(f.title),
            court: text(f.court),
            jurisdiction: text(f.jurisdiction),
            decided_year: i32::try_from(year).unwrap_or(0),
            summary: text(f.summary),
        })
    }
}

/// Cut `summary` to at most `max_chars` characters at a word boundary,
/// appending an ellipsis when anything was dropped.
pub fn make_snippet(summary: &str, max_chars: usize) -> String {
    let summary = summary.trim();
    if summary.chars().count() <= max_chars {
        return summary.to_string();
    }
    let cut: String = summary.chars().take(max_chars).collect();
    let at_word = match cut.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    let at_word = at_word.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '.'));
    format!("{at_word}…")
}

/// The shared index, loaded from the `precedents` table on first call.
pub async fn get_precedents() -> Result<Arc<PrecedentIndex>, AppError> {
    PRECEDENTS
        .get_or_try_init(|| async {
            let pool = crate::db::get_db().await?;
            let rows = crate::repo::precedent::list_all(pool).await?;
            PrecedentIndex::from_precedents(&rows).map(Arc::new)
        })
        .await
        .cloned()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    pub(crate) fn precedent(citation: &str, title: &str, jurisdiction: &str, year: i32, summary: &str) -> Precedent {
        Precedent {
            id: Uuid::new_v4(),
            citation: citation.to_string(),
            title: title.to_string(),
            court: "Supreme Court".to_string(),
            jurisdiction: jurisdiction.to_string(),
            decided_year: year,
            summary: summary.to_string(),
        }
    }

    pub(crate) fn sample_index() -> PrecedentIndex {
        PrecedentIndex::from_precedents(&[
            precedent(
                "347 U.S. 483",
                "Brown v. Board of Education",
                "Federal",
                1954,
                "State laws establishing racial segregation in public schools are unconstitutional.",
            ),
            precedent(
                "5 U.S. 137",
                "Marbury v. Madison",
                "Federal",
                1803,
                "Established the principle of judicial review over acts of Congress.",
            ),
            precedent(
                "17 Cal. 3d 425",
                "Tarasoff v. Regents of the University of California",
                "California",
                1976,
                "Mental health professionals owe a duty to protect individuals threatened by a patient.",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn blank_query_returns_nothing() {
        let index = sample_index();
        assert!(index.search(&PrecedentQuery::new("   ")).is_empty());
    }

    #[test]
    fn matches_title_and_summary() {
        let index = sample_index();
        let hits = index.search(&PrecedentQuery::new("segregation"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].precedent.citation, "347 U.S. 483");
        assert_eq!(hits[0].precedent.decided_year, 1954);
        assert!(hits[0].score > 0.0);

        let hits = index.search(&PrecedentQuery::new("marbury"));
        assert_eq!(hits[0].precedent.title, "Marbury v. Madison");
    }

    #[test]
    fn jurisdiction_filter_is_case_insensitive() {
        let index = sample_index();
        let query = PrecedentQuery::new("duty OR review").with_jurisdiction("california");
        let hits = index.search(&query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].precedent.jurisdiction, "California");

        let all = index.search(&PrecedentQuery::new("duty OR review").with_jurisdiction("All"));
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn limit_caps_results() {
        let index = sample_index();
        let hits = index.search(&PrecedentQuery::new("v").with_limit(1));
        assert!(hits.len() <= 1);
        let hits = index.search(&PrecedentQuery::new("segregation OR review OR duty").with_limit(2));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn malformed_query_does_not_fail() {
        let index = sample_index();
        let hits = index.search(&PrecedentQuery::new("segregation AND ("));
        assert!(hits.len() <= 3);
    }

    #[test]
    fn rebuild_replaces_corpus() {
        let index = sample_index();
        assert_eq!(index.len(), 3);
        index
            .rebuild(&[precedent("1 X 1", "Only Case", "Texas", 2001, "Nothing more.")])
            .unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.search(&PrecedentQuery::new("segregation")).is_empty());
    }

    #[test]
    fn snippet_short_summary_unchanged() {
        assert_eq!(make_snippet("  A short holding. ", 240), "A short holding.");
    }

    #[test]
    fn snippet_cuts_at_word_boundary() {
        let summary = "alpha beta gamma delta";
        assert_eq!(make_snippet(summary, 13), "alpha beta…");
        let long = "word ".repeat(100);
        let snippet = make_snippet(&long, SNIPPET_CHARS);
        assert!(snippet.chars().count() <= SNIPPET_CHARS + 1);
        assert!(snippet.ends_with("word…"));
    }
}
