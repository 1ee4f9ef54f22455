//! Background decoding
//!
//! Decoding a replay takes long enough that interactive applications want it off of their main
//! thread. The [`Worker`] owns a thread that receives [`Request`]s and answers with
//! [`Response`]s over crossbeam channels. Buffers move into the worker with the request, so
//! nothing is shared between the threads.
//!
//! For a decode request the worker answers, in order, with the drivers, the per lap data once
//! the event stream has been drained, and a close. A failure anywhere answers with a single
//! error instead.

use crate::errors::Error;
use crate::inflate::decompress;
use crate::laps::{aggregate, DriverLaps};
use crate::models::Driver;
use crate::parser::decode;
use crossbeam_channel::{bounded, unbounded, Receiver, SendError, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Work sent to the worker
#[derive(Debug, Clone)]
pub enum Request {
    /// Inflate the compressed replay file contents
    Decompress(Vec<u8>),

    /// Decode an already inflated replay
    Decode(Vec<u8>),
}

/// Messages sent from the worker
#[derive(Debug, Clone)]
pub enum Response {
    Decompressed(Vec<u8>),
    Drivers(Vec<Driver>),
    DriverLapData(Vec<DriverLaps>),
    Close,
    Error(String),
}

pub struct Worker {
    requests: Option<Sender<Request>>,
    responses: Receiver<Response>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    pub fn spawn() -> std::io::Result<Worker> {
        let (req_tx, req_rx) = bounded(4);
        let (resp_tx, resp_rx) = unbounded();
        let handle = thread::Builder::new()
            .name(String::from("rf2vcr-worker"))
            .spawn(move || run(req_rx, resp_tx))?;

        Ok(Worker {
            requests: Some(req_tx),
            responses: resp_rx,
            handle: Some(handle),
        })
    }

    pub fn send(&self, request: Request) -> Result<(), SendError<Request>> {
        match &self.requests {
            Some(tx) => tx.send(request),
            None => Err(SendError(request)),
        }
    }

    pub fn responses(&self) -> &Receiver<Response> {
        &self.responses
    }

    /// Stops accepting requests and waits for outstanding work to finish
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("replay worker panicked");
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(requests: Receiver<Request>, responses: Sender<Response>) {
    for request in requests {
        let sent = match request {
            Request::Decompress(data) => match decompress(&data) {
                Ok(inflated) => responses.send(Response::Decompressed(inflated)),
                Err(e) => responses.send(Response::Error(Error::from(e).to_string())),
            },
            Request::Decode(data) => decode_replay(&data, &responses),
        };

        // Nobody is listening anymore
        if sent.is_err() {
            debug!("response channel closed, stopping replay worker");
            return;
        }
    }
}

fn decode_replay(data: &[u8], responses: &Sender<Response>) -> Result<(), SendError<Response>> {
    let replay = match decode(data) {
        Ok(replay) => replay,
        Err(e) => return responses.send(Response::Error(Error::from(e).to_string())),
    };

    responses.send(Response::Drivers(replay.drivers.clone()))?;
    match aggregate(replay.events()) {
        Ok(laps) => {
            responses.send(Response::DriverLapData(laps))?;
            responses.send(Response::Close)
        }
        Err(e) => responses.send(Response::Error(Error::from(e).to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_reports_decode_error() {
        let worker = Worker::spawn().unwrap();
        worker.send(Request::Decode(b"garbage".to_vec())).unwrap();
        match worker.responses().recv().unwrap() {
            Response::Error(msg) => assert!(msg.starts_with("Could not decode replay header")),
            x => panic!("unexpected response: {:?}", x),
        }
        worker.shutdown();
    }

    #[test]
    fn worker_reports_decompress_error() {
        let worker = Worker::spawn().unwrap();
        worker.send(Request::Decompress(b"garbage".to_vec())).unwrap();
        assert!(matches!(
            worker.responses().recv().unwrap(),
            Response::Error(_)
        ));
    }
}
