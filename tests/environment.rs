#[cfg(test)]
mod environment_tests {
    use rox::environment::Environment;
    use rox::error::RuntimeErrorKind;
    use rox::token::{Token, TokenType};
    use rox::value::Value;

    fn name(lexeme: &str) -> Token {
        Token::new(TokenType::IDENTIFIER, lexeme, 1)
    }

    #[test]
    fn test_define_overwrites_in_same_scope() {
        let globals = Environment::new_global();

        globals.borrow_mut().define("a", Value::from(1.0));
        globals.borrow_mut().define("a", Value::from("two"));

        assert_eq!(globals.borrow().get(&name("a")).unwrap(), Value::from("two"));
    }

    #[test]
    fn test_get_walks_outward_and_inner_shadows() {
        let globals = Environment::new_global();
        globals.borrow_mut().define("a", Value::from(1.0));
        globals.borrow_mut().define("b", Value::from(true));

        let inner = Environment::child(&globals);
        inner.borrow_mut().define("a", Value::from(2.0));

        assert_eq!(inner.borrow().get(&name("a")).unwrap(), Value::Number(2.0));
        assert_eq!(inner.borrow().get(&name("b")).unwrap(), Value::Bool(true));
        assert_eq!(globals.borrow().get(&name("a")).unwrap(), Value::Number(1.0));

        assert!(inner.borrow().contains("a"));
        assert!(!inner.borrow().contains("b"));
    }

    #[test]
    fn test_undefined_variable() {
        let globals = Environment::new_global();
        let err = globals.borrow().get(&name("missing")).unwrap_err();

        assert_eq!(err.kind, RuntimeErrorKind::UndefinedVariable);
        assert_eq!(err.message, "Undefined variable 'missing'.");
        assert_eq!(err.to_string(), "Undefined variable 'missing'.\n[line 1]");
    }

    #[test]
    fn test_assign_never_creates() {
        let globals = Environment::new_global();
        let inner = Environment::child(&globals);

        let err = inner
            .borrow_mut()
            .assign(&name("x"), Value::Nil)
            .unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::UndefinedVariable);
        assert!(!globals.borrow().contains("x"));
        assert!(!inner.borrow().contains("x"));
    }

    #[test]
    fn test_assign_updates_nearest_binding() {
        let globals = Environment::new_global();
        globals.borrow_mut().define("x", Value::from(1.0));

        let inner = Environment::child(&globals);
        inner.borrow_mut().assign(&name("x"), Value::from(5.0)).unwrap();

        assert_eq!(globals.borrow().get(&name("x")).unwrap(), Value::Number(5.0));
        assert!(!inner.borrow().contains("x"));
    }

    #[test]
    fn test_distance_access_skips_shadowing() {
        let globals = Environment::new_global();
        globals.borrow_mut().define("a", Value::from("global"));

        let middle = Environment::child(&globals);
        middle.borrow_mut().define("a", Value::from("middle"));

        let inner = Environment::child(&middle);
        inner.borrow_mut().define("a", Value::from("inner"));

        assert_eq!(Environment::get_at(&inner, 0, &name("a")).unwrap(), Value::from("inner"));
        assert_eq!(Environment::get_at(&inner, 1, &name("a")).unwrap(), Value::from("middle"));
        assert_eq!(Environment::get_at(&inner, 2, &name("a")).unwrap(), Value::from("global"));

        Environment::assign_at(&inner, 1, &name("a"), Value::from("changed")).unwrap();
        assert_eq!(middle.borrow().get(&name("a")).unwrap(), Value::from("changed"));
        assert_eq!(inner.borrow().get(&name("a")).unwrap(), Value::from("inner"));
    }

    #[test]
    fn test_distance_access_reports_missing_name() {
        let globals = Environment::new_global();
        let inner = Environment::child(&globals);
        globals.borrow_mut().define("a", Value::Nil);

        let err = Environment::get_at(&inner, 0, &name("a")).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::UndefinedVariable);

        let err = Environment::assign_at(&inner, 0, &name("a"), Value::Nil).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::UndefinedVariable);
    }

    #[test]
    fn test_ancestor_and_enclosing_agree() {
        let globals = Environment::new_global();
        let inner = Environment::child(&Environment::child(&globals));

        let two_up = Environment::ancestor(&inner, 2);
        assert!(std::rc::Rc::ptr_eq(&two_up, &globals));

        let one_up = inner.borrow().enclosing().expect("has a parent");
        assert!(std::rc::Rc::ptr_eq(&Environment::ancestor(&inner, 1), &one_up));
        assert!(globals.borrow().enclosing().is_none());
    }
}
