//! Tree-walking evaluator.
//!
//! `execute` and `evaluate` recurse along the shape of the AST, so the host
//! stack depth follows the program's call and nesting depth.  A `return` is
//! not an error: it travels back up as [`Flow::Return`] until the nearest
//! function call picks it up.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{Expr, ExprId, FunctionDecl, LiteralValue, Stmt};
use crate::callable::{LoxFunction, NativeFunction};
use crate::class::{LoxClass, LoxInstance};
use crate::environment::{EnvRef, Environment};
use crate::error::{RuntimeError, RuntimeErrorKind};
use crate::natives;
use crate::resolver::Locals;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// How a statement finished.
#[derive(Debug, Clone)]
pub enum Flow {
    Normal,
    Return(Value),
}

/// Convenient alias for interpreter results.
pub type IResult<T> = Result<T, RuntimeError>;

pub struct Interpreter {
    globals: EnvRef,
    environment: EnvRef,
    locals: Locals,
    natives: Vec<Rc<NativeFunction>>,
    out: Box<dyn Write>,
    repl: bool,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter printing to stdout, with the default natives installed.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Same as [`Interpreter::new`] but `print` writes to `out`.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        info!("Initializing Interpreter");

        let globals = Environment::new_global();

        let mut interpreter = Self {
            environment: Rc::clone(&globals),
            globals,
            locals: Locals::new(),
            natives: Vec::new(),
            out,
            repl: false,
        };

        for native in natives::defaults() {
            interpreter.define_native(native);
        }

        interpreter
    }

    /// Echo the value of expression statements (interactive mode).
    pub fn set_repl(&mut self, repl: bool) {
        self.repl = repl;
    }

    /// Install a host function as a global.
    pub fn define_native(&mut self, native: NativeFunction) {
        debug!("Defining native function '{}'", native.name);

        let native = Rc::new(native);
        self.globals
            .borrow_mut()
            .define(native.name, Value::Native(Rc::clone(&native)));
        self.natives.push(native);
    }

    pub fn natives(&self) -> &[Rc<NativeFunction>] {
        &self.natives
    }

    pub fn globals(&self) -> &EnvRef {
        &self.globals
    }

    /// Take in a side table produced by the resolver.
    pub fn add_locals(&mut self, locals: Locals) {
        debug!("Installing {} resolved local(s)", locals.len());
        self.locals.extend(locals);
    }

    /// Runs a list of statements (a "program") until the first runtime error.
    pub fn interpret(&mut self, statements: &[Stmt]) -> IResult<()> {
        debug!("Interpreting {} statements", statements.len());

        for stmt in statements {
            debug!("Executing statement: {:?}", stmt);
            self.execute(stmt)?;
        }

        info!("Interpretation completed successfully");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────────────────

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt) -> IResult<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                let value = self.evaluate(expr)?;
                if self.repl {
                    self.emit(&value);
                }
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                self.emit(&value);
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Variable '{}' defined with value: {}", name.lexeme, value);
                self.environment.borrow_mut().define(&name.lexeme, value);
            }

            Stmt::Block(statements) => {
                let environment = Environment::child(&self.environment);
                return self.execute_block(statements, environment);
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    return self.execute(then_branch);
                } else if let Some(else_stmt) = else_branch {
                    return self.execute(else_stmt);
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
            }

            Stmt::Function(decl) => {
                debug!("Defining function '{}'", decl.name.lexeme);
                let function = LoxFunction::new(Rc::clone(decl), Rc::clone(&self.environment), false);
                self.environment
                    .borrow_mut()
                    .define(&decl.name.lexeme, Value::Function(Rc::new(function)));
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.execute_class(name, superclass.as_ref(), methods)?,

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(e) => self.evaluate(e)?,
                    None => Value::Nil,
                };
                debug!("Returning value: {}", value);
                return Ok(Flow::Return(value));
            }
        }

        Ok(Flow::Normal)
    }

    /// Run `statements` with `environment` as the current scope.  The previous
    /// scope is restored whichever way the block exits.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: EnvRef) -> IResult<Flow> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let result = self.run_statements(statements);

        self.environment = previous;
        result
    }

    fn run_statements(&mut self, statements: &[Stmt]) -> IResult<Flow> {
        for stmt in statements {
            if let Flow::Return(value) = self.execute(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn execute_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDecl>],
    ) -> IResult<()> {
        debug!("Defining class '{}'", name.lexeme);

        let superclass = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(class) => Some(class),
                _ => {
                    let token = match expr {
                        Expr::Variable { name, .. } => name,
                        _ => name,
                    };
                    return Err(RuntimeError::type_mismatch(
                        token,
                        "Superclass must be a class.",
                    ));
                }
            },
            None => None,
        };

        let defining = Rc::clone(&self.environment);
        defining.borrow_mut().define(&name.lexeme, Value::Nil);

        // methods close over a scope holding `super`
        let method_env = match &superclass {
            Some(superclass) => {
                let env = Environment::child(&defining);
                env.borrow_mut()
                    .define("super", Value::Class(Rc::clone(superclass)));
                env
            }
            None => Rc::clone(&defining),
        };

        let methods: HashMap<String, Rc<LoxFunction>> = methods
            .iter()
            .map(|decl| {
                let is_initializer = decl.name.lexeme == "init";
                let function = LoxFunction::new(Rc::clone(decl), Rc::clone(&method_env), is_initializer);
                (decl.name.lexeme.clone(), Rc::new(function))
            })
            .collect();

        let class = LoxClass::new(name.lexeme.clone(), superclass, methods);
        info!("Class '{}' defined: {:?}", name.lexeme, class);

        defining
            .borrow_mut()
            .define(&name.lexeme, Value::Class(Rc::new(class)));

        Ok(())
    }

    fn emit(&mut self, value: &Value) {
        debug!("Printed value: {}", value);
        // an unwritable sink has nowhere left to report to
        let _ = writeln!(self.out, "{}", value);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────────────────

    /// Evaluates an expression and returns a Value.
    pub fn evaluate(&mut self, expr: &Expr) -> IResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;

                match self.locals.get(*id) {
                    Some(distance) => {
                        Environment::assign_at(&self.environment, distance, name, value.clone())?
                    }
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                debug!("Assigned value {} to '{}'", value, name.lexeme);
                Ok(value)
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;

                let short_circuit = if operator.token_type == TokenType::OR {
                    left.is_truthy()
                } else {
                    !left.is_truthy()
                };

                if short_circuit {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;

                let mut args = Vec::with_capacity(arguments.len());
                for arg in arguments {
                    args.push(self.evaluate(arg)?);
                }

                self.call(&callee, paren, args)
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => LoxInstance::get(&instance, name),
                _ => Err(RuntimeError::type_mismatch(
                    name,
                    "Only instances have properties.",
                )),
            },

            Expr::Set {
                object,
                name,
                value,
            } => {
                let Value::Instance(instance) = self.evaluate(object)? else {
                    return Err(RuntimeError::type_mismatch(name, "Only instances have fields."));
                };

                let value = self.evaluate(value)?;
                instance.borrow_mut().set(name, value.clone());
                Ok(value)
            }

            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),

            Expr::Super {
                id,
                keyword,
                method,
            } => self.evaluate_super(*id, keyword, method),
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> IResult<Value> {
        match self.locals.get(id) {
            Some(distance) => Environment::get_at(&self.environment, distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    /// `super.method`: search from the superclass, bind to the current `this`.
    fn evaluate_super(
        &mut self,
        id: ExprId,
        keyword: &Token,
        method: &Token,
    ) -> IResult<Value> {
        let distance = self
            .locals
            .get(id)
            .expect("'super' is always resolved to a local scope");

        let superclass = match Environment::get_at(&self.environment, distance, keyword)? {
            Value::Class(class) => class,
            other => {
                return Err(RuntimeError::type_mismatch(
                    keyword,
                    format!("'super' is bound to a {}.", other.type_name()),
                ))
            }
        };

        // `this` always sits one scope inside `super`
        let this_token = Token::synthetic(TokenType::THIS, "this", keyword.line);
        let instance = match Environment::get_at(&self.environment, distance - 1, &this_token)? {
            Value::Instance(instance) => instance,
            other => {
                return Err(RuntimeError::type_mismatch(
                    keyword,
                    format!("'this' is bound to a {}.", other.type_name()),
                ))
            }
        };

        match superclass.find_method(&method.lexeme) {
            Some(found) => Ok(Value::Function(Rc::new(found.bind(instance)))),
            None => Err(RuntimeError::undefined_property(method)),
        }
    }

    fn evaluate_unary(&mut self, op: &Token, expr: &Expr) -> IResult<Value> {
        let right = self.evaluate(expr)?;

        match op.token_type {
            TokenType::MINUS => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::type_mismatch(op, "Operand must be a number.")),
            },
            TokenType::BANG => Ok(Value::Bool(!right.is_truthy())),
            _ => unreachable!("parser only builds '!' and '-' unary nodes"),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> IResult<Value> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;
        debug!("Binary '{}': {} , {}", op.lexeme, left, right);

        match op.token_type {
            TokenType::EQUAL_EQUAL => return Ok(Value::Bool(left == right)),
            TokenType::BANG_EQUAL => return Ok(Value::Bool(left != right)),
            TokenType::PLUS => {
                return match (left, right) {
                    (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                    (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                    _ => Err(RuntimeError::type_mismatch(
                        op,
                        "Operands must be two numbers or two strings.",
                    )),
                }
            }
            _ => {}
        }

        let (Value::Number(a), Value::Number(b)) = (left, right) else {
            return Err(RuntimeError::type_mismatch(op, "Operands must be numbers."));
        };

        let value = match op.token_type {
            TokenType::MINUS => Value::Number(a - b),
            TokenType::STAR => Value::Number(a * b),
            TokenType::SLASH => {
                if b == 0.0 {
                    return Err(RuntimeError::new(
                        RuntimeErrorKind::DivisionByZero,
                        op,
                        "Division by zero.",
                    ));
                }
                Value::Number(a / b)
            }
            TokenType::PERCENT => Value::Number(a % b),
            TokenType::GREATER => Value::Bool(a > b),
            TokenType::GREATER_EQUAL => Value::Bool(a >= b),
            TokenType::LESS => Value::Bool(a < b),
            TokenType::LESS_EQUAL => Value::Bool(a <= b),
            _ => unreachable!("parser only builds known binary operators"),
        };

        Ok(value)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Calls
    // ─────────────────────────────────────────────────────────────────────────

    /// Invoke `callee`.  Arity is checked before anything runs.
    pub fn call(&mut self, callee: &Value, paren: &Token, args: Vec<Value>) -> IResult<Value> {
        let arity = match callee {
            Value::Native(native) => native.arity,
            Value::Function(function) => function.arity(),
            Value::Class(class) => class.arity(),
            _ => {
                return Err(RuntimeError::new(
                    RuntimeErrorKind::NotCallable,
                    paren,
                    "Can only call functions and classes.",
                ))
            }
        };

        if args.len() != arity {
            return Err(RuntimeError::new(
                RuntimeErrorKind::ArityMismatch {
                    expected: arity,
                    got: args.len(),
                },
                paren,
                format!("Expected {} arguments but got {}.", arity, args.len()),
            ));
        }

        match callee {
            Value::Native(native) => {
                debug!("Calling native function '{}'", native.name);
                Ok(native.call(&args))
            }
            Value::Function(function) => self.call_function(function, args),
            Value::Class(class) => self.instantiate(class, args),
            _ => unreachable!("non-callables rejected above"),
        }
    }

    fn call_function(&mut self, function: &LoxFunction, args: Vec<Value>) -> IResult<Value> {
        debug!("Calling user-defined function '{}'", function.name());

        let environment = Environment::child(&function.closure);
        {
            let mut scope = environment.borrow_mut();
            for (param, arg) in function.declaration.params.iter().zip(args) {
                scope.define(&param.lexeme, arg);
            }
        }

        let flow = self.execute_block(&function.declaration.body, environment)?;

        if function.is_initializer {
            let this_token = Token::synthetic(TokenType::THIS, "this", function.declaration.name.line);
            return Environment::get_at(&function.closure, 0, &this_token);
        }

        Ok(match flow {
            Flow::Return(value) => value,
            Flow::Normal => Value::Nil,
        })
    }

    fn instantiate(&mut self, class: &Rc<LoxClass>, args: Vec<Value>) -> IResult<Value> {
        debug!("Instantiating class '{}'", class.name);

        let instance = Rc::new(RefCell::new(LoxInstance::new(Rc::clone(class))));

        if let Some(initializer) = class.find_method("init") {
            let bound = initializer.bind(Rc::clone(&instance));
            self.call_function(&bound, args)?;
        }

        Ok(Value::Instance(instance))
    }
}
