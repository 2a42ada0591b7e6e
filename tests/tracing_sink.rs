use callwise::{Config, Interceptor, Invocation, Severity, TracingLogger};
use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn records_become_tracing_events() {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let interceptor = Interceptor::new(
            Config::new(true, Severity::Info),
            Arc::new(TracingLogger::new()),
        );
        let invocation = Invocation::new("checkout").with_args(&[&"cart-7"]);
        let result: Result<u32, String> =
            interceptor.around(&invocation, || Err("payment declined".to_string()));
        assert!(result.is_err());
    });

    let output = buffer.contents();
    assert!(output.contains("INFO"), "{output}");
    assert!(output.contains("calling checkout(..)"), "{output}");
    assert!(output.contains("ERROR"), "{output}");
    assert!(output.contains("checkout(..) failed: payment declined"), "{output}");
    assert!(output.contains("callwise"), "{output}");
}
