//! `XMLHttpRequest` transport.
//!
//! `fetch` has no upload progress events, so this is the default.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, ProgressEvent, XmlHttpRequest};

use super::{form_data, parse_response_body};
use crate::engine::{ProgressFn, Transport, UploadRequest};
use crate::types::{ProgressTick, UploadError, UploadResult};

#[derive(Clone, Copy, Debug, Default)]
pub struct XhrTransport;

type Reply = Rc<RefCell<Option<oneshot::Sender<UploadResult<Value>>>>>;

fn settle(reply: &Reply, result: UploadResult<Value>) {
    if let Some(tx) = reply.borrow_mut().take() {
        let _ = tx.send(result);
    }
}

fn tick_from(event: &ProgressEvent) -> ProgressTick {
    ProgressTick {
        loaded: event.loaded().max(0.0) as u64,
        total: event
            .length_computable()
            .then(|| event.total().max(0.0) as u64),
    }
}

#[async_trait(?Send)]
impl Transport<File> for XhrTransport {
    async fn submit(&self, request: UploadRequest<File>, on_progress: ProgressFn) -> UploadResult<Value> {
        let body = form_data(&request)?;
        let xhr = XmlHttpRequest::new()
            .map_err(|e| UploadError::Request(format!("Failed to create XMLHttpRequest: {:?}", e)))?;

        xhr.open_with_async("POST", &request.url, true)
            .map_err(|e| UploadError::Request(format!("Failed to open request: {:?}", e)))?;
        for (key, value) in &request.headers {
            xhr.set_request_header(key, value).map_err(|e| {
                UploadError::Request(format!("Invalid header '{}': {:?}", key, e))
            })?;
        }
        xhr.set_with_credentials(request.with_credentials);

        let (tx, rx) = oneshot::channel();
        let reply: Reply = Rc::new(RefCell::new(Some(tx)));

        let onprogress = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
            on_progress(tick_from(&event));
        });
        let upload = xhr
            .upload()
            .map_err(|e| UploadError::Request(format!("No upload target: {:?}", e)))?;
        upload.set_onprogress(Some(onprogress.as_ref().unchecked_ref()));

        let onload = {
            let reply = Rc::clone(&reply);
            let xhr = xhr.clone();
            Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
                let status = xhr.status().unwrap_or(0);
                let text = xhr.response_text().ok().flatten().unwrap_or_default();
                let result = if (200..300).contains(&status) {
                    Ok(parse_response_body(&text))
                } else {
                    Err(UploadError::Status { status, body: text })
                };
                settle(&reply, result);
            })
        };
        xhr.set_onload(Some(onload.as_ref().unchecked_ref()));

        let onerror = {
            let reply = Rc::clone(&reply);
            Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
                let reason = match event.type_().as_str() {
                    "abort" => "request aborted",
                    "timeout" => "request timed out",
                    _ => "connection failed",
                };
                settle(&reply, Err(UploadError::Network(reason.to_string())));
            })
        };
        xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        xhr.set_onabort(Some(onerror.as_ref().unchecked_ref()));
        xhr.set_ontimeout(Some(onerror.as_ref().unchecked_ref()));

        if let Err(e) = xhr.send_with_opt_form_data(Some(&body)) {
            settle(&reply, Err(UploadError::Network(format!("{:?}", e))));
        }

        let result = rx
            .await
            .unwrap_or_else(|_| Err(UploadError::Network("request dropped".to_string())));

        // closures must outlive every callback the browser can still fire
        upload.set_onprogress(None);
        xhr.set_onload(None);
        xhr.set_onerror(None);
        xhr.set_onabort(None);
        xhr.set_ontimeout(None);
        drop((onprogress, onload, onerror));

        result
    }
}
