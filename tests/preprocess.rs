// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use asmpp::core::line_source::text_lines;
use asmpp::{preprocess, preprocess_str, PreprocessError};
use pretty_assertions::assert_eq;

const PROGRAM: &str = "\
.eqv SYS_PRINT_INT 1
.eqv SYS_EXIT 10
.eqv COUNT 5

.macro PRINT_INT (%reg)
  move $a0, %reg
  li $v0, SYS_PRINT_INT
  syscall
.end_macro

.macro EXIT
  li $v0, SYS_EXIT
  syscall
.end_macro

.macro LOOP_BODY (%i, %acc)
  add %acc, %acc, %i
  PRINT_INT(%acc)
.end_macro

.text
main:
  li $t0, COUNT
  li $t1, 0
loop:
  LOOP_BODY($t0, $t1)
  addi $t0, $t0, -1
  bgtz $t0, loop
  EXIT
";

const EXPECTED: &str = "\
.text
main:
  li $t0, 5
  li $t1, 0
loop:
  add $t1, $t1, $t0
  move $a0, $t1
  li $v0, 1
  syscall
  addi $t0, $t0, -1
  bgtz $t0, loop
  li $v0, 10
  syscall
";

#[test]
fn expands_realistic_program() {
    // Blank lines between directives survive; directive lines vanish.
    let expected = format!("\n\n\n\n{EXPECTED}");
    assert_eq!(preprocess_str(PROGRAM).unwrap(), expected);
}

#[test]
fn nested_macro_is_flattened_when_defined() {
    let out = preprocess(text_lines(PROGRAM)).unwrap();
    let loop_start = out.iter().position(|l| l == "loop:\n").unwrap();
    assert_eq!(out[loop_start + 1], "  add $t1, $t1, $t0\n");
    assert_eq!(out[loop_start + 2], "  move $a0, $t1\n");
}

#[test]
fn whole_word_equivalences() {
    let out = preprocess_str(".eqv FOO bar\nFOOBAR baz FOO\n").unwrap();
    assert_eq!(out, "FOOBAR baz bar\n");
}

#[test]
fn last_equivalence_wins() {
    assert_eq!(preprocess_str(".eqv X 1\n.eqv X 2\nX\n").unwrap(), "2\n");
}

#[test]
fn zero_argument_invocation_skips_substitution() {
    let out = preprocess_str(".macro M (%a)\n%a\n.end_macro\nM\n").unwrap();
    assert_eq!(out, "%a\n");
}

#[test]
fn positional_substitution_yields_single_line() {
    let out = preprocess_str(".macro ADD (%a, %b)\nadd %a, %b\n.end_macro\nADD(t0, t1)\n").unwrap();
    assert_eq!(out, "add t0, t1\n");
}

#[test]
fn equivalences_are_resolved_at_definition_time() {
    let text = ".eqv N 5\n.macro SHOW\n.word N\n.end_macro\n.eqv N 6\nSHOW\n.word N\n";
    assert_eq!(preprocess_str(text).unwrap(), ".word 5\n.word 6\n");
}

#[test]
fn non_directive_lines_are_copied_exactly() {
    let text = "\t.data\r\nmsg: .asciiz \"x = FOO\"\n   \n.end_macro extra\nlast line";
    assert_eq!(preprocess_str(text).unwrap(), text);
}

#[test]
fn empty_input_gives_empty_output() {
    assert_eq!(preprocess_str("").unwrap(), "");
}

#[test]
fn unterminated_macro_fails_the_run() {
    let err = preprocess_str(".eqv A 1\n.macro BROKEN (%x)\n  nop %x\n").unwrap_err();
    match err {
        PreprocessError::UnterminatedMacro { name, line } => {
            assert_eq!(name, "BROKEN");
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn arity_mismatch_inside_macro_body_fails_at_definition() {
    let text = ".macro ONE (%a)\nnop %a\n.end_macro\n.macro TWO\nONE(x, y)\n.end_macro\n";
    let err = preprocess_str(text).unwrap_err();
    assert_eq!(err.to_string(), "line 5: macro 'ONE' expects 1 argument(s), found 2");
}
