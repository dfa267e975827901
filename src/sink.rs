// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::Level;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

/**
A destination that mirrors formatted lines.

Rotation files are written by the logger itself; sinks receive every line that passes the
logger's effective level, after the file write.
*/
pub trait Sink: Debug + Send + Sync {
    /**
        Receives one formatted line, without a trailing newline.
    */
    fn write_line(&self, level: Level, line: &str);

    /**
    Receives one formatted line asynchronously.

    This allows sinks to reuse an async context that already exists.
    Sinks may choose to implement this as a simple wrapper around [Self::write_line] if they wish.
    */
    fn write_line_async<'s>(
        &'s self,
        level: Level,
        line: String,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 's>> {
        Box::pin(async move { self.write_line(level, &line) })
    }

    /**
    The application may imminently exit.  Ensure all buffers are flushed and up to date.
    */
    fn prepare_to_die(&self);
}

/*
Boilerplate notes.

# Sink

Clone on a trait object makes no sense, so copy's out.
PartialEq and Eq: data equality or provenance? Avoid.
Default is not sensible since who knows how a sink is constructed.
Send/Sync are required: loggers are shared between threads.
*/
