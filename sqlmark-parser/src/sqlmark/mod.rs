//! Main module for sqlmark engine functionality

pub mod ast;
pub mod document;
pub mod extraction;
pub mod hints;
pub mod interpolation;
pub mod pipeline;
pub mod regions;
pub mod tokenizing;

#[cfg(test)]
pub(crate) mod testing;
