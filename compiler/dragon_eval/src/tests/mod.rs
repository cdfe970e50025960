//! Operator test modules, kept out of the implementation files.
