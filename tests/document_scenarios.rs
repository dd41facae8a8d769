//! Scenario tests for filtering, sorting and key-path access.

use std::collections::BTreeMap;

use yamlgraft::{Error, Yaml};

fn keys(path: &[&str]) -> Vec<String> {
    path.iter().map(|key| key.to_string()).collect()
}

const NESTED: &str = "\
k1: v1
keep:
  not: this
  only:
    not: this either
    this:
      part:
        k2: v2
        k3: v3
        arr:
          - a1
          - a2
k2: v2
";

struct FilterScenario {
    title: &'static str,
    input: &'static str,
    marker: &'static str,
    want: &'static str,
}

const FILTER_SCENARIOS: &[FilterScenario] = &[
    FilterScenario {
        title: "tags and comments",
        input: "\
hello: !key world
a:
  - !key a1
  - a2 # key
  - a3
  - o1: !key k1
    o2: k2 # key
",
        marker: "key",
        want: "\
hello: !key world
a:
  - !key a1
  - a2 # key
  - o1: !key k1
    o2: k2 # key
",
    },
    FilterScenario {
        title: "keep whole sequence",
        input: "\
a: !key
  - a1
  - a2 # key
  - a3
b:
  - do not keep
  - this also not
  - c: and this neither
c:
  keep: !key
    - a
    - b
",
        marker: "key",
        want: "\
a: !key
  - a1
  - a2 # key
  - a3
c:
  keep: !key
    - a
    - b
",
    },
    FilterScenario {
        title: "literal block",
        input: "\
key: removed
persistent: !humanOverwrite |
  line 1
  line 2
anotherKey: keepAsWell # humanOverwrite
",
        marker: "humanOverwrite",
        want: "\
persistent: !humanOverwrite |
  line 1
  line 2
anotherKey: keepAsWell # humanOverwrite
",
    },
    FilterScenario {
        title: "sequence alone",
        input: "\
array:
  - v1
  - v2  # humanOverwrite
  - !humanOverwrite v3
  - v4  # humanOverwrite
",
        marker: "humanOverwrite",
        want: "\
array:
  - v2 # humanOverwrite
  - !humanOverwrite v3
  - v4 # humanOverwrite
",
    },
    FilterScenario {
        title: "nothing selected",
        input: "key: value\n",
        marker: "human overwrite",
        want: "",
    },
    FilterScenario {
        title: "empty input",
        input: "",
        marker: "human overwrite",
        want: "",
    },
    FilterScenario {
        title: "marker with spaces",
        input: "\
plain: value-not-persisted
notPersisted:
  nested: value
persisted0: persValue0 # human overwrite
persisted1:
  nested: persValue1  # human overwrite
  multi:
    2deep: value
    2deepPers: persValue2 # human overwrite
array:
- element0 # human overwrite
- element1
- element2 # human overwrite
nestedArray:
  array:
  - nestedEl0 # human overwrite
  - nestedEl1
  - - hello
    - keep # human overwrite
  - bla: blub
",
        marker: "human overwrite",
        want: "\
persisted0: persValue0 # human overwrite
persisted1:
  nested: persValue1 # human overwrite
  multi:
    2deepPers: persValue2 # human overwrite
array:
  - element0 # human overwrite
  - element2 # human overwrite
nestedArray:
  array:
    - nestedEl0 # human overwrite
    - - keep # human overwrite
",
    },
];

#[test]
fn test_filter_by_scenarios() {
    for scenario in FILTER_SCENARIOS {
        let mut doc = Yaml::parse(scenario.input).unwrap();
        doc.filter_by(scenario.marker).unwrap();
        assert_eq!(doc.to_string(), scenario.want, "scenario: {}", scenario.title);
    }
}

#[test]
fn test_filter_by_rejects_aliases() {
    let input = "hello: &hello 'hello'\ngreeting:\n  hello: *hello\n";
    let mut doc = Yaml::parse(input).unwrap();
    let before = doc.clone();
    let err = doc.filter_by("human overwrite").unwrap_err();
    assert!(matches!(err, Error::AliasNotSupported { .. }));
    assert_eq!(doc, before);
}

#[test]
fn test_filter_by_keys_keeps_path() {
    let mut doc = Yaml::parse(NESTED).unwrap();
    doc.filter_by_keys(&keys(&["keep", "only", "this", "part"]))
        .unwrap();
    assert_eq!(
        doc.to_string(),
        "\
keep:
  only:
    this:
      part:
        k2: v2
        k3: v3
        arr:
          - a1
          - a2
"
    );
}

#[test]
fn test_filter_by_keys_missing_path_empties_document() {
    let mut doc = Yaml::parse(&NESTED.replace("keep:", "doNotKeep:")).unwrap();
    doc.filter_by_keys(&keys(&["keep", "only", "this", "part"]))
        .unwrap();
    assert!(doc.is_empty());
    assert_eq!(doc.to_string(), "");
}

#[test]
fn test_sort_scenarios() {
    let scenarios = [
        ("z: v1\na: v2\n", "a: v2\nz: v1\n"),
        (
            "z: v1\na: v2\nb:\n  - z\n  - a\n",
            "a: v2\nb:\n  - z\n  - a\nz: v1\n",
        ),
        (
            "- z: v1\n  a: v2\n- a:\n    z: v3\n    a: v4\n",
            "- a: v2\n  z: v1\n- a:\n    a: v4\n    z: v3\n",
        ),
    ];
    for (input, want) in scenarios {
        let mut doc = Yaml::parse(input).unwrap();
        doc.sort();
        assert_eq!(doc.to_string(), want);
    }
}

#[test]
fn test_sort_keeps_comments_and_tags() {
    let mut doc = Yaml::parse("b: !T 2 # two\na: 1 # one\n").unwrap();
    doc.sort();
    assert_eq!(doc.to_string(), "a: 1 # one\nb: !T 2 # two\n");
}

#[test]
fn test_select_sub_element() {
    let doc = Yaml::parse(NESTED).unwrap();
    let sub = doc
        .select_sub_element(&keys(&["keep", "only", "this", "part"]))
        .unwrap();
    assert_eq!(sub.to_string(), "k2: v2\nk3: v3\narr:\n  - a1\n  - a2\n");
}

#[test]
fn test_select_sub_element_missing_key() {
    let doc = Yaml::parse(&NESTED.replace("keep:", "doNotKeep:")).unwrap();
    let err = doc
        .select_sub_element(&keys(&["keep", "only", "this", "part"]))
        .unwrap_err();
    assert_eq!(err.to_string(), "key not present in node: \"keep\"");
}

#[test]
fn test_insert_builds_missing_path() {
    let mut doc = Yaml::parse("k1: v1\nk2: v2\n").unwrap();
    let value: BTreeMap<&str, &str> = [("k1", "v1"), ("k2", "v2")].into_iter().collect();
    let warnings = doc.insert(&keys(&["add", "this", "part"]), &value).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(
        doc.to_string(),
        "\
k1: v1
k2: v2
add:
  this:
    part:
      k1: v1
      k2: v2
"
    );
}

#[test]
fn test_insert_replaces_existing_node() {
    let mut doc = Yaml::parse(NESTED).unwrap();
    let value: BTreeMap<&str, &str> = [("k2", "overwrite")].into_iter().collect();
    doc.insert(&keys(&["keep", "only", "this", "part"]), &value)
        .unwrap();
    assert_eq!(
        doc.to_string(),
        "\
k1: v1
keep:
  not: this
  only:
    not: this either
    this:
      part:
        k2: overwrite
k2: v2
"
    );
}

#[test]
fn test_insert_into_empty_document() {
    let mut doc = Yaml::empty();
    doc.insert(&keys(&["a", "b"]), &3).unwrap();
    assert_eq!(doc.to_string(), "a:\n  b: 3\n");
}
