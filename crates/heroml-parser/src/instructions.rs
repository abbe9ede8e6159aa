//! Canned response-format instructions.
//!
//! Source text may carry `--return-json-array-*` flags where a prompt
//! needs its generated response in a machine-readable shape. Expansion
//! replaces each flag with its full instruction text; it runs before
//! the source is split into steps.

/// Flag → instruction text. Longer flags come first so the
/// `--return-json-array-objects` family is not clipped by its prefix.
const INSTRUCTIONS: &[(&str, &str)] = &[
    (
        "--return-json-array-objects-two-keys",
        r#"Only return a JSON array of objects, where each object has exactly two keys. For example:
[
    {"key1":"value1", "key2":"value2"},
    {"key1":"value3", "key2":"value4"}
]"#,
    ),
    (
        "--return-json-array-objects-three-keys",
        r#"Only return a JSON array of objects, where each object has exactly three keys. For example:
[
    {"key1":"value1", "key2":"value2", "key3":"value3"},
    {"key1":"value4", "key2":"value5", "key3":"value6"}
]"#,
    ),
    (
        "--return-json-array-objects-mixed",
        r#"Only return a JSON array of objects, where each object can have mixed key-value types. For example:
[
    {"key1":"value1", "key2":2},
    {"key1":"value3", "key2":4, "key3": true}
]"#,
    ),
    (
        "--return-json-array-objects-nested",
        r#"Only return a JSON array of objects, where some objects contain nested objects. For example:
[
    {"name":"John", "age":30, "address": {"city": "New York", "country": "USA"}},
    {"name":"Anna", "age":27, "address": {"city": "Berlin", "country": "Germany"}}
]"#,
    ),
    (
        "--return-json-array-objects-arrays",
        r#"Only return a JSON array of objects, where some objects contain arrays. For example:
[
    {"name":"John", "age":30, "hobbies": ["swimming", "reading"]},
    {"name":"Anna", "age":27, "hobbies": ["painting", "coding"]}
]"#,
    ),
    (
        "--return-json-array-objects",
        r#"Only return a json array of objects as a plain text response. Each object should be simple and have consistent keys. For example:
[{"name":"John", "age":30}, {"name":"Anna", "age":27}]"#,
    ),
    (
        "--return-json-array-strings",
        r#"Please output a valid JSON array of strings, formatted correctly. This array should contain one or more string values. Each string value must be enclosed in double quotes and separated from the next string by a comma. Remember, the entire array should be enclosed in square brackets.

Here's an example of the format of the array I'm expecting:
["this is a string", "this is another string", "another random string"]

Note that there should be no trailing comma after the last string in the array, and no single quotes are used around string values.
Please avoid breaking the JSON structure by ensuring all opening brackets, quotes, and commas have corresponding closing brackets, quotes, and commas."#,
    ),
    (
        "--return-json-array-numbers",
        r#"Only return a json array of numbers as a plain text response. For example:
[1, 2, 3, 4]"#,
    ),
    (
        "--return-json-array-boolean",
        r#"Only return a json array of boolean values as a plain text response. For example:
[true, false, true]"#,
    ),
    (
        "--return-json-array-dates",
        r#"Only return a json array of date strings as a plain text response. For example:
["2023-06-14", "2023-06-15", "2023-06-16"]"#,
    ),
    (
        "--return-json-array-mixed",
        r#"Only return a JSON array with mixed value types (strings, numbers, objects, arrays). For example:
[
    "String",
    42,
    {"key": "value"},
    ["Item1", "Item2"]
]"#,
    ),
];

/// Replace every instruction flag in `source` with its expansion.
pub fn expand_instructions(source: &str) -> String {
    INSTRUCTIONS
        .iter()
        .fold(source.to_string(), |text, (flag, instruction)| {
            text.replace(flag, instruction)
        })
}
