use callwise::{Config, InMemoryLogger, Interceptor, Severity, intercept};
use std::num::ParseIntError;
use std::sync::Arc;

struct Inventory {
    interceptor: Interceptor,
    stock: u32,
}

impl Inventory {
    fn new(level: Severity) -> (Self, Arc<InMemoryLogger>) {
        let logger = Arc::new(InMemoryLogger::new());
        let inventory = Inventory {
            interceptor: Interceptor::new(Config::new(true, level), logger.clone()),
            stock: 10,
        };
        (inventory, logger)
    }

    #[intercept(with = self.interceptor)]
    fn reserve(&self, sku: &str, quantity: u32) -> Result<u32, String> {
        if quantity > self.stock {
            return Err(format!("only {} of {} left", self.stock, sku));
        }
        Ok(self.stock - quantity)
    }

    #[intercept(with = self.interceptor, advice(before, after_success, after_exception))]
    fn parse_quantity(&self, text: &str) -> Result<u32, ParseIntError> {
        let quantity = text.trim().parse::<u32>()?;
        Ok(quantity)
    }

    #[intercept(with = self.interceptor, advice(after_exception))]
    fn restock(&mut self, mut quantity: u32) -> Result<u32, String> {
        quantity += 1;
        self.stock += quantity;
        Ok(self.stock)
    }
}

fn shared() -> &'static Interceptor {
    static SHARED: std::sync::OnceLock<(Interceptor, Arc<InMemoryLogger>)> =
        std::sync::OnceLock::new();
    &SHARED
        .get_or_init(|| {
            let logger = Arc::new(InMemoryLogger::new());
            let interceptor = Interceptor::new(Config::new(true, Severity::Debug), logger.clone());
            (interceptor, logger)
        })
        .0
}

#[intercept(with = shared(), advice(around, before))]
fn double<T: Into<u64> + std::fmt::Debug>(value: T) -> Result<u64, String>
where
    T: Copy,
{
    let wide: u64 = value.into();
    Ok(wide * 2)
}

#[test]
fn around_is_the_default_advice() {
    let (inventory, logger) = Inventory::new(Severity::Info);
    assert_eq!(inventory.reserve("widget", 3), Ok(7));

    let records = logger.drain_records();
    let messages: Vec<String> = records.iter().map(|r| r.message()).collect();
    assert_eq!(records.len(), 3, "{messages:?}");
    assert!(messages[0].starts_with("calling "));
    assert!(messages[0].ends_with("::reserve(..)"));
    assert!(messages[1].ends_with("args: [\"widget\", 3]"));
    assert!(records[2].field_value("elapsed_ms").is_some());
}

#[test]
fn early_return_errors_pass_through() {
    let (inventory, logger) = Inventory::new(Severity::Error);
    assert_eq!(
        inventory.reserve("gadget", 50),
        Err("only 10 of gadget left".to_string())
    );

    let records = logger.drain_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].severity(), Severity::Error);
    assert!(records[0].message().ends_with("failed: only 10 of gadget left"));
}

#[test]
fn question_mark_errors_reach_after_exception() {
    let (inventory, logger) = Inventory::new(Severity::Error);
    assert!(inventory.parse_quantity("many").is_err());

    let records = logger.drain_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message(), "parse_quantity failed: invalid digit found in string");
}

#[test]
fn before_and_after_success_compose() {
    let (inventory, logger) = Inventory::new(Severity::Info);
    assert_eq!(inventory.parse_quantity(" 4 "), Ok(4));

    let records = logger.drain_records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].message(), "entering parse_quantity");
    assert!(records[1].message().ends_with("parse_quantity(..) returned 4"));
}

#[test]
fn mutable_receivers_and_params() {
    let (mut inventory, logger) = Inventory::new(Severity::Info);
    assert_eq!(inventory.restock(4), Ok(15));
    assert_eq!(inventory.stock, 15);
    assert!(logger.is_empty());
}

#[test]
fn free_functions_with_generics() {
    assert_eq!(double(21u32), Ok(42));
    assert_eq!(double(4u8), Ok(8));
}
