mod helpers;
use helpers::run_program;

#[test]
fn self_reference_in_initializer() {
    assert_eq!(
        run_program("{ var a = a; }").unwrap_err(),
        "[line 1] Error: Can't read local variable 'a' in its own initializer."
    );
}

#[test]
fn duplicate_local_declaration() {
    assert_eq!(
        run_program("{ var a = 1; var a = 2; }").unwrap_err(),
        "[line 1] Error: Already variable with this name in this scope."
    );
}

#[test]
fn parameter_shadowed_by_local() {
    assert_eq!(
        run_program("fun f(a) { var a = 1; }").unwrap_err(),
        "[line 1] Error: Already variable with this name in this scope."
    );
}

#[test]
fn global_redefinition_is_permitted() {
    assert_eq!(run_program("var a = 1; var a = 2; print a;").unwrap(), "2\n");
}

#[test]
fn local_shadowing_across_scopes_is_permitted() {
    assert_eq!(
        run_program("var a = 1; { var a = 2; print a; } print a;").unwrap(),
        "2\n1\n"
    );
}

#[test]
fn return_outside_function() {
    assert_eq!(
        run_program("return 1;").unwrap_err(),
        "[line 1] Error: Can't return from top-level code."
    );
}

#[test]
fn return_value_from_initializer() {
    assert_eq!(
        run_program("class A { init() { return 1; } }").unwrap_err(),
        "[line 1] Error: Can't return a value from an initializer."
    );
}

#[test]
fn bare_return_from_initializer_is_permitted() {
    assert_eq!(
        run_program("class A { init() { return; } } print A();").unwrap(),
        "A instance\n"
    );
}

#[test]
fn this_outside_class() {
    assert_eq!(
        run_program("print this;").unwrap_err(),
        "[line 1] Error: Can't use 'this' outside of a class."
    );
    assert_eq!(
        run_program("fun f() { return this; }").unwrap_err(),
        "[line 1] Error: Can't use 'this' outside of a class."
    );
}

#[test]
fn super_outside_class() {
    assert_eq!(
        run_program("super.greet();").unwrap_err(),
        "[line 1] Error: Can't use 'super' outside of a class."
    );
}

#[test]
fn super_in_class_without_superclass() {
    assert_eq!(
        run_program("class A { m() { super.m(); } }").unwrap_err(),
        "[line 1] Error: Can't use 'super' in a class with no superclass."
    );
}

#[test]
fn class_inheriting_from_itself() {
    assert_eq!(
        run_program("class A < A {}").unwrap_err(),
        "[line 1] Error: A class can't inherit from itself."
    );
}

#[test]
fn first_error_aborts_resolution() {
    // Both lines are scope violations; only the first is reported.
    assert_eq!(
        run_program("return 1;\nprint this;").unwrap_err(),
        "[line 1] Error: Can't return from top-level code."
    );
}

#[test]
fn error_lines_are_tracked() {
    assert_eq!(
        run_program("var ok = 1;\n{\n  var b = 2;\n  var b = 3;\n}").unwrap_err(),
        "[line 4] Error: Already variable with this name in this scope."
    );
}
