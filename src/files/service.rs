use std::pin::Pin;
use std::time::Duration;

use async_stream::stream;
use futures::Stream;

use super::Error;
use super::model::{Kind, Upload, Uploaded};

const PROGRESS_STEP: u8 = 10;
const PROGRESS_CEILING: u8 = 90;
const PROGRESS_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug)]
pub enum Event {
    Progress(u8),
    Done(Uploaded),
    Failed(Error),
}

pub struct UploadService {
    api: super::Api,
}

impl UploadService {
    pub fn new(api: super::Api) -> Self {
        Self { api }
    }

    /// One upload attempt with synthetic progress: steps of 10% every 200ms
    /// up to 90%, then 100% on completion. The reported progress is not tied
    /// to real transfer progress, and the request cannot be canceled once
    /// issued.
    pub fn upload(&self, upload: Upload, kind: Kind) -> Pin<Box<dyn Stream<Item = Event> + Send>> {
        let api = self.api.clone();

        Box::pin(stream! {
            if upload.payload.is_empty() {
                yield Event::Failed(Error::Empty(upload.filename));
                return;
            }

            let mut percent: u8 = 0;
            let mut tick = tokio::time::interval(PROGRESS_INTERVAL);
            let request = api.upload(&upload, kind);
            tokio::pin!(request);

            loop {
                let completed = tokio::select! {
                    _ = tick.tick(), if percent < PROGRESS_CEILING => None,
                    result = &mut request => Some(result),
                };

                match completed {
                    None => {
                        percent += PROGRESS_STEP;
                        yield Event::Progress(percent);
                    }
                    Some(Ok(uploaded)) => {
                        yield Event::Progress(100);
                        yield Event::Done(uploaded);
                        break;
                    }
                    Some(Err(error)) => {
                        yield Event::Failed(error);
                        break;
                    }
                }
            }
        })
    }
}
