//! Arithmetic scenario
//!
//! Four bound methods are chained into one handler, then removed two at a
//! time until the handler is nil.

use crate::config::ArithmeticConfig;
use crate::report::{Step, Transcript};
use multicast_delegate::Delegate;
use std::cell::RefCell;
use std::rc::Rc;

/// Handler signature: two operands in, one value out
pub type ArithmeticHandler = Delegate<(f64, f64), f64>;

/// Records every operation it performs
#[derive(Debug, Default)]
pub struct Arithmetic {
    history: RefCell<Vec<String>>,
}

impl Arithmetic {
    pub fn sum(&self, &(x, y): &(f64, f64)) -> f64 {
        self.record(format!("{} + {} = {}", x, y, x + y));
        x + y
    }

    pub fn diff(&self, &(x, y): &(f64, f64)) -> f64 {
        self.record(format!("{} - {} = {}", x, y, x - y));
        x - y
    }

    pub fn prod(&self, &(x, y): &(f64, f64)) -> f64 {
        self.record(format!("{} * {} = {}", x, y, x * y));
        x * y
    }

    pub fn quot(&self, &(x, y): &(f64, f64)) -> f64 {
        self.record(format!("{} / {} = {}", x, y, x / y));
        x / y
    }

    fn record(&self, line: String) {
        self.history.borrow_mut().push(line);
    }

    /// Drain the recorded history
    pub fn take_history(&self) -> Vec<String> {
        std::mem::take(&mut *self.history.borrow_mut())
    }
}

pub fn run(config: &ArithmeticConfig) -> Transcript {
    let arithmetic = Rc::new(Arithmetic::default());
    let operands = (config.x, config.y);
    let mut steps = Vec::new();

    let mut step = |action: &str, handler: &ArithmeticHandler| {
        log::debug!("{} ({} handler(s))", action, handler.len());
        let result = handler.invoke_or(&operands, config.default_result);
        steps.push(Step {
            action: action.to_string(),
            is_nil: handler.is_nil(),
            result: Some(result),
            history: arithmetic.take_history(),
        });
    };

    let sum = ArithmeticHandler::bind(&arithmetic, Arithmetic::sum);
    let diff = ArithmeticHandler::bind(&arithmetic, Arithmetic::diff);
    let prod = ArithmeticHandler::bind(&arithmetic, Arithmetic::prod);
    let quot = ArithmeticHandler::bind(&arithmetic, Arithmetic::quot);

    let mut handler = ArithmeticHandler::new();
    handler += &sum;
    handler += &diff;
    handler += &prod;
    handler += &quot;
    step("handler = sum + diff + prod + quot", &handler);

    handler -= &prod + &quot;
    step("handler -= prod + quot", &handler);

    handler -= &sum + &diff;
    step("handler -= sum + diff", &handler);

    Transcript {
        scenario: "arithmetic".to_string(),
        steps,
    }
}
