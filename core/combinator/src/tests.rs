//! FILENAME: core/combinator/src/tests.rs
//! PURPOSE: Consolidated unit tests for the combinator crate.

use crate::combinators::{fix, lazy, one_of, one_or_more, optionally_followed, zero_or_more};
use crate::parser::{eof, fail, func, parse, parse_prefix, satisfy, succeed, token, Parser};
use crate::text::{capital, character, digit, natural_number, skip_whitespace, spaces, string, tokens};
use crate::{curry, curry3};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn chars(input: &str) -> Vec<char> {
    input.chars().collect()
}

/// Every result of `parser` on `input`, with the remainder rendered as text.
fn results<R: crate::Value>(parser: &Parser<char, R>, input: &str) -> Vec<(R, String)> {
    let input = chars(input);
    let out = parser
        .run(&input)
        .iter()
        .map(|(value, rest)| (value, rest.iter().collect::<String>()))
        .collect();
    out
}

// ========================================
// PRIMITIVES
// ========================================

#[test]
fn succeed_consumes_nothing() {
    assert_eq!(results(&succeed(42), "abc"), vec![(42, "abc".to_string())]);
}

#[test]
fn fail_yields_nothing() {
    assert!(results(&fail::<char, i32>(), "abc").is_empty());
}

#[test]
fn satisfy_consumes_matching_head() {
    let vowel = satisfy(|c: &char| "aeiou".contains(*c));
    assert_eq!(results(&vowel, "abc"), vec![('a', "bc".to_string())]);
    assert!(results(&vowel, "bca").is_empty());
    assert!(results(&vowel, "").is_empty());
}

#[test]
fn token_matches_by_equality() {
    assert_eq!(results(&token('a'), "ab"), vec![('a', "b".to_string())]);
    assert!(results(&token('a'), "ba").is_empty());
}

#[test]
fn eof_only_on_empty_input() {
    assert_eq!(results(&eof(), ""), vec![((), String::new())]);
    assert!(results(&eof(), "x").is_empty());
}

#[test]
fn primitives_work_over_non_character_tokens() {
    let tokens = [1, 2, 3];
    let even = satisfy(|n: &i32| n % 2 == 0);
    assert_eq!(parse(&token(1).then(&even).skip(&token(3)), &tokens), Some(2));
}

// ========================================
// MAP / ALTERNATION / SEQUENCING
// ========================================

#[test]
fn map_transforms_value_and_keeps_remainder() {
    let upper = token('a').map(|c| c.to_ascii_uppercase());
    assert_eq!(results(&upper, "ab"), vec![('A', "b".to_string())]);
}

#[test]
fn alternation_tries_the_right_side() {
    let a_or_b = token('a') | token('b');
    assert_eq!(results(&a_or_b, "bcd"), vec![('b', "cd".to_string())]);
}

#[test]
fn alternation_keeps_every_reading_leftmost_first() {
    let short_or_long = string("a").or(&string("ab"));
    assert_eq!(
        results(&short_or_long, "ab"),
        vec![("a".to_string(), "b".to_string()), ("ab".to_string(), String::new())]
    );
    assert_eq!(parse(&short_or_long, &chars("ab")), Some("ab".to_string()));
}

#[test]
fn apply_feeds_curried_arguments_in_order() {
    let pair = succeed(curry(|a: char, b: char| format!("{a}{b}")))
        .apply(&token('x'))
        .apply(&token('y'));
    assert_eq!(parse(&pair, &chars("xy")), Some("xy".to_string()));
    assert_eq!(parse(&pair, &chars("yx")), None);
}

#[test]
fn curry3_takes_three_arguments() {
    let triple = succeed(curry3(|a: char, b: char, c: char| [a, b, c].iter().collect::<String>()))
        .apply(&token('a'))
        .apply(&token('b'))
        .apply(&token('c'));
    assert_eq!(parse(&triple, &chars("abc")), Some("abc".to_string()));
}

#[test]
fn skip_and_then_keep_one_side() {
    let left = token('a').skip(&token('b'));
    let right = token('a').then(&token('b'));
    assert_eq!(results(&left, "abc"), vec![('a', "c".to_string())]);
    assert_eq!(results(&right, "abc"), vec![('b', "c".to_string())]);
    assert!(results(&left, "ac").is_empty());
}

#[test]
fn and_pairs_both_values() {
    assert_eq!(parse(&token('a').and(&token('b')), &chars("ab")), Some(('a', 'b')));
}

#[test]
fn first_commits_to_the_first_reading() {
    let digits = one_or_more(&digit());
    assert_eq!(digits.run(&chars("123")).iter().count(), 3);
    assert_eq!(digits.first().run(&chars("123")).iter().count(), 1);
}

// ========================================
// REPETITION
// ========================================

#[test]
fn zero_or_more_yields_longest_first() {
    let lengths: Vec<usize> = results(&zero_or_more(&token('a')), "aaab")
        .into_iter()
        .map(|(found, _)| found.len())
        .collect();
    assert_eq!(lengths, vec![3, 2, 1, 0]);
}

#[test]
fn zero_or_more_succeeds_on_no_match() {
    assert_eq!(results(&zero_or_more(&token('a')), "b"), vec![(vec![], "b".to_string())]);
}

#[test]
fn zero_or_more_stops_on_non_consuming_parser() {
    let repeated = zero_or_more(&succeed::<char, char>('x'));
    assert_eq!(results(&repeated, "abc"), vec![(vec![], "abc".to_string())]);
}

#[test]
fn zero_or_more_handles_long_input() {
    let input = chars(&"a".repeat(20_000));
    assert_eq!(parse(&zero_or_more(&token('a')), &input).map(|v| v.len()), Some(20_000));
    assert_eq!(parse(&one_or_more(&token('a')), &input).map(|v| v.len()), Some(20_000));
}

#[test]
fn zero_or_more_backtracks_out_of_long_runs() {
    let input = chars(&"a".repeat(20_000));
    let all_but_last = zero_or_more(&token('a')).skip(&token('a'));
    assert_eq!(parse(&all_but_last, &input).map(|v| v.len()), Some(19_999));
}

#[test]
fn zero_or_more_tries_every_reading_of_each_step() {
    let step = string("a") | string("aa");
    let found: Vec<(String, String)> = results(&zero_or_more(&step), "aaa")
        .into_iter()
        .map(|(steps, rest)| (steps.join(","), rest))
        .collect();
    let expected = [
        ("a,a,a", ""),
        ("a,a", "a"),
        ("a,aa", ""),
        ("a", "aa"),
        ("aa,a", ""),
        ("aa", "a"),
        ("", "aaa"),
    ];
    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(steps, rest)| (steps.to_string(), rest.to_string()))
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn one_or_more_requires_a_match() {
    assert!(parse(&one_or_more(&token('a')), &chars("")).is_none());
    assert_eq!(parse(&one_or_more(&token('a')), &chars("aa")), Some(vec!['a', 'a']));
}

#[test]
fn one_of_preserves_list_order() {
    let choice = one_of(vec![string("+"), string("+="), string("-")]);
    let found: Vec<String> = results(&choice, "+=")
        .into_iter()
        .map(|(value, _)| value)
        .collect();
    assert_eq!(found, vec!["+".to_string(), "+=".to_string()]);
}

// ========================================
// TEXT HELPERS
// ========================================

#[test]
fn tokens_and_string_match_exact_runs() {
    assert_eq!(parse(&tokens(&[1, 2]), &[1, 2]), Some(vec![1, 2]));
    assert_eq!(results(&string("let"), "let x"), vec![("let".to_string(), " x".to_string())]);
    assert!(results(&string("let"), "le").is_empty());
}

#[test]
fn natural_number_folds_digits() {
    assert_eq!(parse(&natural_number(), &chars("1207")), Some(1207));
    assert_eq!(parse(&natural_number(), &chars("007")), Some(7));
}

#[test]
fn natural_number_rejects_overflow() {
    assert_eq!(parse(&natural_number(), &chars("99999999999999999999999")), None);
}

#[test]
fn spaces_consume_long_runs() {
    let input = chars(&format!("{}x", " ".repeat(20_000)));
    assert_eq!(parse(&spaces().then(&character('x')), &input), Some('x'));
}

#[test]
fn capital_is_ascii_only() {
    assert_eq!(parse(&capital(), &chars("Q")), Some('Q'));
    assert_eq!(parse(&capital(), &chars("q")), None);
    assert_eq!(parse(&capital(), &chars("É")), None);
    assert_eq!(parse(&capital(), &chars("Ω")), None);
}

#[test]
fn skip_whitespace_drops_leading_blanks() {
    assert_eq!(parse(&skip_whitespace(&character('x')), &chars(" \t\nx")), Some('x'));
}

// ========================================
// SELF-REFERENCE
// ========================================

/// Nesting depth of balanced parentheses: `((()))` is 3.
fn nesting() -> Parser<char, usize> {
    fix(|this| {
        character('(')
            .then(&this)
            .skip(&character(')'))
            .map(|depth| depth + 1)
            | succeed(0)
    })
}

#[test]
fn fix_parses_recursive_structure() {
    assert_eq!(parse(&nesting(), &chars("((()))")), Some(3));
    assert_eq!(parse(&nesting(), &chars("")), Some(0));
    assert_eq!(parse(&nesting(), &chars("(()")), None);
}

#[test]
fn fix_handles_deep_nesting() {
    let input = format!("{}{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(parse(&nesting(), &chars(&input)), Some(100));
}

#[test]
fn fix_results_outlive_the_parser() {
    let input = chars("(())");
    let found = {
        let parser = nesting();
        parser.run(&input)
    };
    assert_eq!(found.first().map(|(depth, rest)| (depth, rest.len())), Some((2, 0)));
}

#[test]
fn lazy_builds_on_each_run_only() {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&builds);
    let parser = lazy(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        token('a')
    });
    assert_eq!(builds.load(Ordering::SeqCst), 0);
    assert_eq!(parse(&parser, &chars("a")), Some('a'));
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

// ========================================
// OPTIONAL SUFFIX: a character-level calculator
// ========================================

fn operation(symbol: char, evaluate: fn(i64, i64) -> i64, operand: &Parser<char, i64>) -> Parser<char, i64> {
    let with_operator = character(symbol)
        .then(operand)
        .map(move |rhs| func(move |lhs: i64| evaluate(lhs, rhs)));
    optionally_followed(operand, &with_operator)
}

fn calculator() -> Parser<char, i64> {
    let table: [(char, fn(i64, i64) -> i64); 4] = [
        ('*', |a, b| a * b),
        ('/', |a, b| a / b),
        ('+', |a, b| a + b),
        ('-', |a, b| a - b),
    ];
    let number = natural_number().map(|n| n as i64);
    table
        .iter()
        .fold(number, |operand, &(symbol, evaluate)| operation(symbol, evaluate, &operand))
}

#[test]
fn calculator_respects_operator_table_order() {
    assert_eq!(parse(&calculator(), &chars("2+3*4")), Some(14));
    assert_eq!(parse(&calculator(), &chars("8/2")), Some(4));
    assert_eq!(parse(&calculator(), &chars("7")), Some(7));
    assert_eq!(parse(&calculator(), &chars("9-2*3")), Some(3));
}

// ========================================
// SHARING
// ========================================

#[test]
fn parser_can_be_shared_across_threads() {
    let parser = one_or_more(&digit());
    let handles: Vec<_> = (1..=4)
        .map(|n| {
            let parser = parser.clone();
            std::thread::spawn(move || parse(&parser, &chars(&n.to_string().repeat(n))))
        })
        .collect();
    let lengths: Vec<usize> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread panicked").map_or(0, |digits| digits.len()))
        .collect();
    assert_eq!(lengths, vec![1, 2, 3, 4]);
}

#[test]
fn parse_prefix_reports_consumption() {
    let parser = one_or_more(&token('a'));
    assert_eq!(parse_prefix(&parser, &chars("aab")), Some((vec!['a', 'a'], 2)));
    assert_eq!(parse_prefix(&parser, &chars("b")), None);
}
