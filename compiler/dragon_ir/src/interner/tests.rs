use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_intern_and_lookup() {
    let interner = StringInterner::new();

    let x = interner.intern("x");
    let counter = interner.intern("counter");
    let x2 = interner.intern("x");

    assert_eq!(x, x2);
    assert_ne!(x, counter);

    assert_eq!(interner.lookup(x), "x");
    assert_eq!(interner.lookup(counter), "counter");
}

#[test]
fn test_empty_string() {
    let interner = StringInterner::new();
    let empty = interner.intern("");
    assert_eq!(empty, Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
    assert!(interner.is_empty());
}

#[test]
fn test_names_are_case_sensitive() {
    let interner = StringInterner::new();
    assert_ne!(interner.intern("foo"), interner.intern("FOO"));
}

#[test]
fn test_len_counts_distinct_strings() {
    let interner = StringInterner::new();
    interner.intern("a");
    interner.intern("b");
    interner.intern("a");
    // empty string + "a" + "b"
    assert_eq!(interner.len(), 3);
}

#[test]
fn test_unknown_name_resolves_to_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(999)), "");
}

#[test]
fn test_shared_interner() {
    let interner = SharedInterner::new();
    let interner2 = interner.clone();

    let name = interner.intern("shared");
    assert_eq!(interner2.lookup(name), "shared");
    assert_eq!(interner2.intern("shared"), name);
}

#[test]
fn test_string_lookup_trait() {
    fn render<L: StringLookup>(lookup: &L, name: Name) -> String {
        lookup.lookup(name).to_uppercase()
    }

    let interner = StringInterner::new();
    let name = interner.intern("defvar");
    assert_eq!(render(&interner, name), "DEFVAR");
}
