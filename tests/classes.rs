mod common;

#[cfg(test)]
mod class_tests {
    use super::common::{run, run_ok, session};

    use rox::error::{LoxError, RuntimeError, RuntimeErrorKind};
    use rox::token::{Token, TokenType};
    use rox::value::Value;

    fn runtime_error(source: &str) -> RuntimeError {
        match run(source) {
            (_, Err(LoxError::Runtime(e))) => e,
            (_, other) => panic!("expected a runtime error, got {:?}", other),
        }
    }

    #[test]
    fn test_class_and_instance_display() {
        let out = run_ok("class Bagel { eat() {} } print Bagel; print Bagel(); print Bagel().eat;");
        assert_eq!(out, vec!["Bagel", "Bagel instance", "<fn eat>"]);
    }

    #[test]
    fn test_fields() {
        let out = run_ok("class P {} var p = P(); p.x = 1; p.y = p.x + 1; print p.y; print p.x = 7;");
        assert_eq!(out, vec!["2", "7"]);
    }

    #[test]
    fn test_methods_see_this() {
        let out = run_ok(
            r#"
            class Cake {
                taste() {
                    var adjective = "delicious";
                    print "The " + this.flavor + " cake is " + adjective + "!";
                }
            }

            var cake = Cake();
            cake.flavor = "German chocolate";
            cake.taste();
            "#,
        );
        assert_eq!(out, vec!["The German chocolate cake is delicious!"]);
    }

    #[test]
    fn test_initializer() {
        let out = run_ok(
            r#"
            class Pair {
                init(a, b) {
                    this.a = a;
                    this.b = b;
                }
                sum() { return this.a + this.b; }
            }

            var p = Pair(1, 2);
            print p.sum();
            print p.init(3, 4) == p;
            print p.sum();
            "#,
        );
        assert_eq!(out, vec!["3", "true", "7"]);
    }

    #[test]
    fn test_early_return_from_initializer_yields_instance() {
        let out = run_ok(
            "class Foo { init() { this.x = 1; return; this.x = 2; } } var f = Foo(); print f.x; print f.init();",
        );
        assert_eq!(out, vec!["1", "Foo instance"]);
    }

    #[test]
    fn test_super_calls_the_overridden_method() {
        let out = run_ok(
            r#"
            class A { method() { print "A"; } }
            class B < A {
                method() {
                    super.method();
                    print "B";
                }
            }
            B().method();
            "#,
        );
        assert_eq!(out.concat(), "AB");
    }

    #[test]
    fn test_super_is_relative_to_the_defining_class() {
        let out = run_ok(
            r#"
            class A { say() { print "A"; } }
            class B < A { say() { print "B"; super.say(); } }
            class C < B { say() { print "C"; super.say(); } }
            C().say();
            "#,
        );
        assert_eq!(out, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_inherited_initializer_sets_arity() {
        let out = run_ok("class A { init(n) { this.n = n; } } class B < A {} print B(5).n;");
        assert_eq!(out, vec!["5"]);

        let err = runtime_error("class A { init(n) {} } class B < A {} B();");
        assert_eq!(err.kind, RuntimeErrorKind::ArityMismatch { expected: 1, got: 0 });
    }

    #[test]
    fn test_bound_methods_keep_their_receiver() {
        let out = run_ok(
            r#"
            class Person {
                init(name) { this.name = name; }
                greet() { print "hi " + this.name; }
            }

            var greet = Person("jane").greet;
            greet();

            var bob = Person("bob");
            bob.greet = greet;
            bob.greet();
            "#,
        );
        assert_eq!(out, vec!["hi jane", "hi jane"]);
    }

    #[test]
    fn test_binding_one_method_to_many_instances() {
        let out = run_ok(
            r#"
            class Box {
                init(v) { this.v = v; }
                get() { return this.v; }
            }

            var a = Box(1);
            var b = Box(2);
            var getA = a.get;
            var getB = b.get;
            print getA();
            print getB();
            print getA();
            print a.get == a.get;
            "#,
        );
        assert_eq!(out, vec!["1", "2", "1", "false"]);
    }

    #[test]
    fn test_fields_shadow_methods() {
        let out = run_ok("class C { m() { return \"method\"; } } var c = C(); c.m = \"field\"; print c.m;");
        assert_eq!(out, vec!["field"]);
    }

    #[test]
    fn test_objects_compare_by_identity() {
        let out = run_ok("class C {} var a = C(); var b = C(); print a == a; print a == b; print C == C;");
        assert_eq!(out, vec!["true", "false", "true"]);
    }

    #[test]
    fn test_property_errors() {
        let err = runtime_error("class C {} C().nope;");
        assert_eq!(err.kind, RuntimeErrorKind::UndefinedProperty);
        assert_eq!(err.message, "Undefined property 'nope'.");

        let err = runtime_error("var x = 1; print x.y;");
        assert_eq!(err.kind, RuntimeErrorKind::TypeMismatch);
        assert_eq!(err.message, "Only instances have properties.");

        let err = runtime_error("\"s\".y = 1;");
        assert_eq!(err.kind, RuntimeErrorKind::TypeMismatch);
        assert_eq!(err.message, "Only instances have fields.");

        let err = runtime_error("class A { m() {} } class B < A { m() { return super.missing; } } B().m();");
        assert_eq!(err.kind, RuntimeErrorKind::UndefinedProperty);
        assert_eq!(err.message, "Undefined property 'missing'.");
    }

    #[test]
    fn test_superclass_must_be_a_class() {
        let err = runtime_error("var NotClass = 1;\nclass A < NotClass {}");

        assert_eq!(err.kind, RuntimeErrorKind::TypeMismatch);
        assert_eq!(err.message, "Superclass must be a class.");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_class_without_init_takes_no_arguments() {
        let err = runtime_error("class E {} E(1);");
        assert_eq!(err.message, "Expected 0 arguments but got 1.");
    }

    #[test]
    fn test_runtime_model_from_the_host_side() {
        let (mut lox, _) = session();
        lox.run("class A { a() {} } class B < A { b() {} } var inst = B(); inst.field = \"set\";")
            .expect("program runs");

        let globals = lox.interpreter().globals().clone();
        let lookup = |name: &str| {
            globals
                .borrow()
                .get(&Token::new(TokenType::IDENTIFIER, name, 1))
                .expect("global is defined")
        };

        let Value::Class(class) = lookup("B") else {
            panic!("B is not a class");
        };
        assert_eq!(class.superclass.as_ref().map(|s| s.name.as_str()), Some("A"));
        assert!(class.find_method("a").is_some());
        assert!(class.find_method("b").is_some());
        assert!(class.find_method("c").is_none());
        assert_eq!(class.arity(), 0);

        let Value::Instance(instance) = lookup("inst") else {
            panic!("inst is not an instance");
        };
        assert_eq!(instance.borrow().field("field"), Some(&Value::from("set")));
        assert_eq!(instance.borrow().field("a"), None);
    }
}
