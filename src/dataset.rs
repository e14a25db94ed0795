//! Loader for the tab-separated blog-data format.
//!
//! ```text
//! Blog<TAB>word1<TAB>word2<TAB>...
//! name1<TAB>3<TAB>0<TAB>...
//! name2<TAB>1<TAB>7<TAB>...
//! ```
//!
//! The first column of the header is a label and is ignored; the remaining header
//! columns form the vocabulary. Every other line holds a blog name followed by one count
//! per vocabulary word. Blank lines are skipped.

use crate::cluster::{check_vocabulary, VectorEntity, Vocabulary};
use crate::error::{Error, Result};
use log::debug;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

/// A vocabulary plus the blogs defined over it.
#[derive(Clone, Debug)]
pub struct Dataset {
    vocabulary: Arc<Vocabulary>,
    blogs: Vec<VectorEntity>,
}

impl Dataset {
    /// Build a dataset from already-constructed parts.
    ///
    /// Every blog must be defined over `vocabulary` and carry a distinct name.
    pub fn new(vocabulary: Arc<Vocabulary>, blogs: Vec<VectorEntity>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(blogs.len());
        for blog in &blogs {
            check_vocabulary(blog, &vocabulary)?;
            let name = blog.name().unwrap_or_default();
            if !seen.insert(name.to_string()) {
                return Err(Error::DuplicateName(name.to_string()));
            }
        }
        Ok(Self { vocabulary, blogs })
    }

    /// Read a dataset file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dataset = Self::from_reader(BufReader::new(File::open(path)?))?;
        debug!(
            "loaded {} blogs over {} words from {}",
            dataset.len(),
            dataset.vocabulary.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse a dataset from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines().enumerate();

        let mut vocabulary: Option<Arc<Vocabulary>> = None;
        for (_, line) in lines.by_ref() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            // The first header column labels the name column.
            let words = line.split('\t').skip(1).map(|w| w.trim().to_string());
            vocabulary = Some(Arc::new(Vocabulary::new(words)?));
            break;
        }
        let vocabulary = vocabulary.ok_or(Error::EmptyInput)?;

        let mut blogs = Vec::new();
        let mut seen = HashSet::new();
        for (idx, line) in lines {
            let line_no = idx + 1;
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split('\t');
            let name = fields.next().unwrap_or_default().trim();
            let counts = fields
                .map(|field| {
                    field.trim().parse::<f64>().map_err(|_| Error::Parse {
                        line: line_no,
                        message: format!("invalid count {field:?}"),
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            if counts.len() != vocabulary.len() {
                return Err(Error::Parse {
                    line: line_no,
                    message: format!(
                        "expected {} counts, found {}",
                        vocabulary.len(),
                        counts.len()
                    ),
                });
            }
            if !seen.insert(name.to_string()) {
                return Err(Error::DuplicateName(name.to_string()));
            }
            blogs.push(VectorEntity::new(name, Arc::clone(&vocabulary), counts)?);
        }

        Ok(Self { vocabulary, blogs })
    }

    /// The shared vocabulary.
    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    /// All blogs, in file order.
    pub fn blogs(&self) -> &[VectorEntity] {
        &self.blogs
    }

    /// Blog by name.
    pub fn blog(&self, name: &str) -> Option<&VectorEntity> {
        self.blogs.iter().find(|b| b.name() == Some(name))
    }

    /// Blog names, in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blogs.iter().filter_map(VectorEntity::name)
    }

    /// Number of blogs.
    pub fn len(&self) -> usize {
        self.blogs.len()
    }

    /// True if there are no blogs.
    pub fn is_empty(&self) -> bool {
        self.blogs.is_empty()
    }
}
