#[cfg(test)]
mod resolver_tests {
    use rox::ast::{ExprId, Stmt};
    use rox::error::LoxError;
    use rox::parser::Parser;
    use rox::resolver::{Locals, Resolver};
    use rox::scanner::Scanner;

    fn parse(source: &str) -> Vec<Stmt> {
        let (tokens, errors) = Scanner::new(source).scan_all();
        assert!(errors.is_empty(), "unexpected lex errors: {:?}", errors);
        Parser::new(tokens).parse().expect("program parses")
    }

    fn resolve(source: &str) -> Result<Locals, Vec<LoxError>> {
        let program = parse(source);
        Resolver::new().resolve(&program)
    }

    fn resolve_errors(source: &str) -> Vec<String> {
        match resolve(source) {
            Ok(locals) => panic!("expected resolve errors, got {:?}", locals),
            Err(errors) => errors.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_globals_are_left_out_of_the_table() {
        let locals = resolve("var g = 1; print g; g = 2;").expect("resolves");
        assert!(locals.is_empty());
    }

    #[test]
    fn test_global_may_reference_itself() {
        assert!(resolve("var a = a;").is_ok());
    }

    #[test]
    fn test_block_distances() {
        // `a` in the print is #0; the assignment is #2 (#1 was its target
        // parsed as a plain variable first)
        let locals = resolve("{ var a = 1; { print a; a = 2; } }").expect("resolves");

        assert_eq!(locals.get(ExprId(0)), Some(1));
        assert_eq!(locals.get(ExprId(1)), None);
        assert_eq!(locals.get(ExprId(2)), Some(1));
        assert_eq!(locals.len(), 2);
    }

    #[test]
    fn test_closure_capture_distance() {
        let locals = resolve("fun f() { var x; fun g() { return x; } }").expect("resolves");
        assert_eq!(locals.get(ExprId(0)), Some(1));
    }

    #[test]
    fn test_this_and_super_distances() {
        // #0 is the superclass `A`, #1 is `super`, #2 is `this`
        let locals = resolve("class A {} class B < A { m() { super.m(); return this; } }")
            .expect("resolves");

        assert_eq!(locals.get(ExprId(0)), None);
        assert_eq!(locals.get(ExprId(1)), Some(2));
        assert_eq!(locals.get(ExprId(2)), Some(1));
    }

    #[test]
    fn test_own_initializer() {
        assert_eq!(
            resolve_errors("{ var a = a; }"),
            vec!["[line 1] Error at 'a': Can't read local variable in its own initializer."]
        );
    }

    #[test]
    fn test_redeclaration_in_same_scope() {
        assert_eq!(
            resolve_errors("fun f(a) { var b; var b; }"),
            vec!["[line 1] Error at 'b': Already a variable with this name in this scope."]
        );

        // parameters share the body's scope
        assert_eq!(
            resolve_errors("fun f(a, a) {}"),
            vec!["[line 1] Error at 'a': Already a variable with this name in this scope."]
        );

        // shadowing in a nested scope is fine
        assert!(resolve("{ var a; { var a; } }").is_ok());
    }

    #[test]
    fn test_return_rules() {
        assert_eq!(
            resolve_errors("return 1;"),
            vec!["[line 1] Error at 'return': Can't return from top-level code."]
        );

        assert_eq!(
            resolve_errors("class A { init() { return 1; } }"),
            vec!["[line 1] Error at 'return': Can't return a value from an initializer."]
        );

        assert!(resolve("class A { init() { return; } }").is_ok());
    }

    #[test]
    fn test_class_rules() {
        assert_eq!(
            resolve_errors("class A < A {}"),
            vec!["[line 1] Error at 'A': A class can't inherit from itself."]
        );

        assert_eq!(
            resolve_errors("print this;"),
            vec!["[line 1] Error at 'this': Can't use 'this' outside of a class."]
        );

        assert_eq!(
            resolve_errors("fun f() { return super.x; }"),
            vec!["[line 1] Error at 'super': Can't use 'super' outside of a class."]
        );

        assert_eq!(
            resolve_errors("class A { m() { super.m(); } }"),
            vec!["[line 1] Error at 'super': Can't use 'super' in a class with no superclass."]
        );
    }

    #[test]
    fn test_all_errors_reported_in_one_pass() {
        let errors = resolve_errors("return;\n{ var a = a; }\nprint this;");

        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("[line 1]"));
        assert!(errors[1].starts_with("[line 2]"));
        assert!(errors[2].starts_with("[line 3]"));

        for e in resolve("return;").unwrap_err() {
            assert!(e.is_static());
        }
    }
}
