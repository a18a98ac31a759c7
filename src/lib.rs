//! Core library for the soc-categories command line application.
//!
//! The library collapses O*NET work-context workbooks into one categorized
//! row per occupation. Source file recognition lives in
//! [`labor::soc::catalog`], workbook adapters under [`labor::soc::io`], the
//! in-memory tables inside [`labor::soc::model`], the outer join in
//! [`labor::soc::merge`], the median reduction in [`labor::soc::aggregate`],
//! and the run orchestration under [`labor::soc::pipeline`].

pub mod labor;

pub use labor::soc::{
    Result, SocError, aggregate, catalog, error, io, merge, model, pipeline,
};
