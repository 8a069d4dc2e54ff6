#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex, Once};

use tracker_engine::{FetchEvent, ProgressSink};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tracker_logging::initialize_for_tests);
}

/// Builds an in-memory zip with the given `(path, content)` entries.
/// Paths ending in `/` become directory entries.
pub fn zip_of(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// One account block as it appears in the HTML followers export.
pub fn follower_block(name: &str, date: &str) -> String {
    format!(
        r#"<div class="pam _3-95 _2ph- _a6-g uiBoxWhite noborder">
  <div class="_a6-p">
    <div>
      <div><a target="_blank" href="https://www.instagram.com/{name}">{name}</a></div>
      <div>{date}</div>
    </div>
  </div>
</div>"#
    )
}

/// One account block as it appears in the HTML following export.
pub fn following_block(name: &str, date: &str) -> String {
    format!(
        r#"<div class="pam _3-95 _2ph- _a6-g uiBoxWhite noborder">
  <h2 class="_3-95 _2pim _a6-h _a6-i">{name}</h2>
  <div class="_a6-p">
    <div>
      <div><a target="_blank" href="https://www.instagram.com/_u/{name}">https://www.instagram.com/_u/{name}</a></div>
      <div>{date}</div>
    </div>
  </div>
</div>"#
    )
}

pub fn html_page(blocks: &[String]) -> String {
    format!(
        "<html><head><meta charset=\"utf-8\"><title>Followers</title></head><body><main>{}</main></body></html>",
        blocks.join("\n")
    )
}

#[derive(Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<FetchEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<FetchEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: FetchEvent) {
        self.events.lock().unwrap().push(event);
    }
}
