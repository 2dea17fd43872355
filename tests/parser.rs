#[cfg(test)]
mod parser_tests {
    use rox::ast::{Expr, ExprId, Stmt};
    use rox::ast_printer::AstPrinter;
    use rox::error::LoxError;
    use rox::parser::Parser;
    use rox::scanner::Scanner;

    fn parser_for(source: &str) -> Parser {
        let (tokens, errors) = Scanner::new(source).scan_all();
        assert!(errors.is_empty(), "unexpected lex errors: {:?}", errors);
        Parser::new(tokens)
    }

    fn parse_ok(source: &str) -> Vec<Stmt> {
        match parser_for(source).parse() {
            Ok(statements) => statements,
            Err(errors) => panic!("unexpected parse errors: {:?}", errors),
        }
    }

    fn parse_errors(source: &str) -> Vec<String> {
        match parser_for(source).parse() {
            Ok(statements) => panic!("expected errors, parsed {:?}", statements),
            Err(errors) => errors.iter().map(ToString::to_string).collect(),
        }
    }

    fn print_expr(source: &str) -> String {
        let expr = parser_for(source)
            .parse_expression()
            .expect("expression parses");
        AstPrinter::print(&expr)
    }

    fn print_program(source: &str) -> Vec<String> {
        parse_ok(source).iter().map(AstPrinter::print_stmt).collect()
    }

    #[test]
    fn test_precedence_and_grouping() {
        assert_eq!(print_expr("1 + 2 * 3"), "(+ 1.0 (* 2.0 3.0))");
        assert_eq!(print_expr("-(1 - 2)"), "(- (group (- 1.0 2.0)))");
        assert_eq!(print_expr("!true == false"), "(== (! true) false)");
        assert_eq!(print_expr("7 % 3 + 1"), "(+ (% 7.0 3.0) 1.0)");
        assert_eq!(print_expr("a or b and c"), "(or a (and b c))");
    }

    #[test]
    fn test_calls_properties_and_assignment() {
        assert_eq!(print_expr("f(1, \"x\")(nil)"), "(call (call f 1.0 x) nil)");
        assert_eq!(print_expr("a.b.c = 1"), "(= (. (. a b) c) 1.0)");
        assert_eq!(print_expr("a = b = 2.5"), "(= a (= b 2.5))");
    }

    #[test]
    fn test_for_loop_desugars_to_while() {
        assert_eq!(
            print_program("for (var i = 0; i < 2; i = i + 1) print i;"),
            vec!["(block (var i 0.0) (while (< i 2.0) (block (print i) (; (= i (+ i 1.0))))))"]
        );

        assert_eq!(
            print_program("for (;;) print 1;"),
            vec!["(while true (print 1.0))"]
        );
    }

    #[test]
    fn test_class_declaration() {
        let program = print_program("class B < A { m() { return super.m(); } init(x) { this.x = x; } }");

        assert_eq!(
            program,
            vec!["(class B < A (fun m() (return (call (super m)))) (fun init(x) (; (= (. this x) x))))"]
        );

        match &parse_ok("class C {}")[0] {
            Stmt::Class {
                superclass,
                methods,
                ..
            } => {
                assert!(superclass.is_none());
                assert!(methods.is_empty());
            }
            other => panic!("expected a class, got {:?}", other),
        }
    }

    #[test]
    fn test_every_error_is_collected() {
        let errors = parse_errors("var = 1;\nprint ;\nprint 1");

        assert_eq!(
            errors,
            vec![
                "[line 1] Error at '=': Expected variable name",
                "[line 2] Error at ';': Expected expression",
                "[line 3] Error at end: Expected ';' after value",
            ]
        );
    }

    #[test]
    fn test_invalid_assignment_target() {
        let errors = parse_errors("1 + 2 = 3;");
        assert_eq!(errors, vec!["[line 1] Error at '=': Invalid assignment target"]);
    }

    #[test]
    fn test_too_many_parameters_is_reported_once() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let source = format!("fun f({}) {{}}", params.join(", "));

        let errors = parse_errors(&source);
        assert_eq!(
            errors,
            vec!["[line 1] Error at 'p255': Cannot have more than 255 parameters"]
        );
    }

    #[test]
    fn test_expression_ids_are_unique_and_based() {
        let (tokens, _) = Scanner::new("a; b; a = b;").scan_all();
        let mut parser = Parser::with_id_base(tokens, 100);
        let program = parser.parse().expect("program parses");

        assert_eq!(parser.id_watermark(), 105);

        match &program[0] {
            Stmt::Expression(Expr::Variable { id, name }) => {
                assert_eq!(*id, ExprId(100));
                assert_eq!(name.lexeme, "a");
            }
            other => panic!("expected a variable, got {:?}", other),
        }

        match &program[2] {
            Stmt::Expression(Expr::Assign { id, value, .. }) => {
                assert_eq!(*id, ExprId(104));
                assert!(matches!(**value, Expr::Variable { id: ExprId(103), .. }));
            }
            other => panic!("expected an assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_expression_rejects_trailing_tokens() {
        let err = parser_for("1 + 2 3").parse_expression().unwrap_err();

        assert!(matches!(err, LoxError::Parse { .. }));
        assert_eq!(err.to_string(), "[line 1] Error at '3': Expected end of expression");
    }

    #[test]
    fn test_missing_eof_is_tolerated() {
        let (mut tokens, _) = Scanner::new("print 1;").scan_all();
        tokens.pop();

        let program = Parser::new(tokens).parse().expect("program parses");
        assert_eq!(program.len(), 1);
    }
}
