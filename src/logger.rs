// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::log_record::LogRecord;
use std::fmt::Debug;

/**
A destination for records emitted by an [`Interceptor`](crate::Interceptor).

Loggers are shared between every call the interceptor wraps, possibly on many threads at
once, so implementations must tolerate concurrent `finish_log_record` calls.  A logger that
panics loses the record it was handed and nothing else; the interceptor does not let the
panic reach the wrapped call.
*/
pub trait Logger: Debug + Send + Sync {
    /**
        Submits the log record for logging.
    */
    fn finish_log_record(&self, record: LogRecord);
}

/*
Boilerplate notes.

# Logger

Clone: not required; interceptors share a sink through an Arc.
PartialEq/Eq: no.  Two sinks writing to the same place aren't obviously equal.
Default: no, construction is sink-specific.
Send/Sync are required: one logger serves every concurrent invocation.
*/
