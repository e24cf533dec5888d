use super::*;

fn lit(s: &str) -> Token {
    Token::literal(s)
}

#[test]
fn literals_are_space_separated() {
    let tokens = TokenList::from_tokens(vec![lit("SELECT"), lit("1")]);
    let q = serialize(&tokens);
    assert_eq!(q.text, "SELECT 1");
    assert!(q.parameters.is_empty());
}

#[test]
fn parameters_are_numbered_in_pre_order() {
    // a = $1 AND (b = $2 OR c IN ($3, $4)) AND d = $5
    let tokens = TokenList::from_tokens(vec![
        lit("a ="),
        Token::param(1),
        lit("AND"),
        Token::group(vec![
            lit("b ="),
            Token::param("two"),
            lit("OR"),
            lit("c IN"),
            Token::group(vec![Token::comma_list(vec![Token::param(3), Token::param(4)])]),
        ]),
        lit("AND d ="),
        Token::param(5),
    ]);

    let q = serialize(&tokens);
    assert_eq!(q.text, "a = $1 AND (b = $2 OR c IN ($3, $4)) AND d = $5");
    assert_eq!(
        q.parameters,
        vec![
            Value::Int(1),
            Value::Text("two".into()),
            Value::Int(3),
            Value::Int(4),
            Value::Int(5),
        ]
    );
}

#[test]
fn numbering_is_global_across_chunks() {
    let base = TokenList::from_tokens(vec![lit("x ="), Token::param(1)]);
    let tokens = base.append([lit("AND y ="), Token::param(2)]);
    assert_eq!(serialize(&tokens).text, "x = $1 AND y = $2");
}

#[test]
fn collection_does_not_add_parentheses() {
    let tokens = TokenList::from_tokens(vec![
        lit("ORDER BY"),
        Token::comma_list(vec![
            Token::collection(vec![lit("a"), lit("DESC")]),
            Token::collection(vec![lit("b")]),
        ]),
    ]);
    assert_eq!(serialize(&tokens).text, "ORDER BY a DESC, b");
}

#[test]
fn separator_honours_custom_glue() {
    let tokens = TokenList::from_tokens(vec![Token::separator(
        " UNION",
        vec![lit("SELECT 1"), lit("SELECT 2")],
    )]);
    assert_eq!(serialize(&tokens).text, "SELECT 1 UNION SELECT 2");
}

#[test]
fn empty_separator_is_an_empty_fragment() {
    let tokens = TokenList::from_tokens(vec![Token::comma_list(vec![])]);
    assert_eq!(serialize(&tokens).text, "");
}

#[test]
fn deep_nesting_is_supported() {
    let mut token = Token::param(0);
    for _ in 0..200 {
        token = Token::group(vec![token]);
    }
    let q = serialize(&TokenList::from_tokens(vec![token]));
    assert_eq!(q.text, format!("{}$1{}", "(".repeat(200), ")".repeat(200)));
    assert_eq!(q.parameters.len(), 1);
}

#[test]
fn serialization_is_idempotent() {
    let tokens = TokenList::from_tokens(vec![
        lit("VALUES"),
        Token::comma_list(vec![
            Token::group(vec![Token::comma_list(vec![Token::param("a"), Token::param(1)])]),
            Token::group(vec![Token::comma_list(vec![Token::param("b"), Token::param(2)])]),
        ]),
    ]);

    assert_eq!(serialize(&tokens), serialize(&tokens));
    assert_eq!(serialize(&tokens).text, "VALUES ($1, $2), ($3, $4)");
}

#[test]
fn append_leaves_the_base_untouched() {
    let base = TokenList::from_tokens(vec![lit("SELECT"), lit("1")]);
    let left = base.append([lit("LIMIT"), Token::param(1)]);
    let right = base.append([lit("OFFSET"), Token::param(2)]);

    assert_eq!(base.len(), 2);
    assert_eq!(serialize(&base).text, "SELECT 1");
    assert_eq!(serialize(&left).text, "SELECT 1 LIMIT $1");
    assert_eq!(serialize(&right).text, "SELECT 1 OFFSET $1");

    assert!(left.extends(&base));
    assert!(right.extends(&base));
    assert!(!left.extends(&right));
}

#[test]
fn appending_nothing_returns_an_equal_list() {
    let base = TokenList::from_tokens(vec![lit("SELECT")]);
    let same = base.append(Vec::new());
    assert_eq!(same, base);
    assert!(same.extends(&base));
}

#[test]
fn to_vec_preserves_order() {
    let list = TokenList::new()
        .append([lit("a")])
        .append([lit("b"), lit("c")])
        .append([lit("d")]);
    assert_eq!(list.len(), 4);
    assert_eq!(list.to_vec(), vec![lit("a"), lit("b"), lit("c"), lit("d")]);
}
