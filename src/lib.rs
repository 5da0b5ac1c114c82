//! VSM - field matching and snippet highlighting for streaming search
//!
//! Given a parsed query and a document's field values, VSM determines which
//! terms hit which fields, recording hit positions and per-field statistics,
//! and produces highlighted copies of matched text.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use vsm::{
//!     Document, FieldModifier, FieldSearchSpecMap, FieldValue, QueryTerm, SearcherBuf,
//!     SnippetModifierManager, VsmFieldsConfig,
//! };
//!
//! let config = VsmFieldsConfig::from_toml_str(r#"
//!     [[fieldspec]]
//!     name = "title"
//!     searchmethod = "AUTOUTF8"
//!     arg1 = "substring"
//!
//!     [[index]]
//!     name = "default"
//!     fields = ["title"]
//! "#)?;
//! let specs = FieldSearchSpecMap::from_config(&config)?;
//!
//! let terms = vec![Arc::new(QueryTerm::parse("default:run"))];
//! let mut searchers = specs.build_searcher_map(&terms, &SearcherBuf::shared(32));
//! let doc = Document::new().with_field(0, FieldValue::string("Road Runner"));
//! searchers.search(&doc);
//! assert_eq!(terms[0].hit_count(), 1);
//!
//! let mut snippets = SnippetModifierManager::new();
//! snippets.setup(&terms, specs.specs(), specs.index_map());
//! let modifier = snippets.get_modifier_mut(0).unwrap();
//! let highlighted = modifier.modify(doc.field(0).unwrap());
//! assert_eq!(highlighted, FieldValue::raw_string(&b"Road \x1FRun\x1Fner"[..]));
//! # Ok::<(), vsm::Error>(())
//! ```
//!
//! # Crates
//!
//! - `vsm-core`: value model, query terms, hits, buffers, errors
//! - `vsm-search`: searchers, field specs, configuration, snippet modifiers

pub use vsm_core::*;
pub use vsm_search::*;
