//! LL(1) parser generator.
//!
//! A grammar description goes through [`meta`] (parsing) and [`extractor`]
//! (checking) into productions, [`synthesis`] builds their predictive
//! table, and the table is either run directly by [`engine`] or compiled
//! into Rust source by [`codegen`]. Generated parsers depend on [`runtime`].

pub mod calc;
pub mod codegen;
pub mod engine;
pub mod error_handling;
pub mod extractor;
pub mod grammar;
pub mod lexer;
pub mod meta;
pub mod runtime;
pub mod sampler;
pub mod synthesis;
