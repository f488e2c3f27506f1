//! # dictform: metadata-driven forms, grids and filters
//!
//! dictform renders CRUD pages from data dictionaries. A dictionary describes
//! the fields of a table, how each one is edited and when it is visible or
//! enabled. The crate turns it into Bootstrap-flavoured HTML.
//!
//! ## Features
//!
//! - **Data dictionaries**: YAML or JSON metadata stored one file per dictionary
//! - **Control factory**: text boxes, combos, check boxes, lookups, sliders and file fields built from field metadata
//! - **Expressions**: `val:` literals and `exp:` conditions over `{placeholders}` drive visibility, enabling and defaults
//! - **Panels and grids**: data panel with validation summary, grid with icons and file links
//! - **Dictionary service**: create from table structure, duplicate, zip export/import, SQL scripts and Rust structs
//!
//! ## Example: Customer dictionary
//!
//! ```yaml
//! name: Customer
//! table_name: tb_customer
//! fields:
//!   - name: Id
//!     type: Int
//!     is_pk: true
//!     data_behavior: ViewOnly
//!   - name: Name
//!     type: Varchar
//!     size: 100
//!     is_required: true
//!   - name: Email
//!     type: Varchar
//!     size: 120
//!     component: Email
//!     visible_expression: "exp:{pagestate} <> 'FILTER'"
//! ```

pub mod actions;
pub mod components;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod expression;
pub mod factory;
pub mod html;
pub mod panel;
pub mod records;
pub mod relation;
pub mod service;
pub mod translate;
pub mod validation;

pub use error::{Error, Result};
pub use expression::{ExpressionManager, ExpressionOptions, PageState};
pub use factory::WebControlFactory;
