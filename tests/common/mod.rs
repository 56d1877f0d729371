#![allow(dead_code)]

use std::fmt;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use es_csv_writer::infrastructure::parsers::csv_source::CsvRowSource;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

/// Records every event's level and message for the current thread.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<(Level, String)>>>);

impl CapturedLogs {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = Registry::default().with(CaptureLayer(self.clone()));
        tracing::subscriber::set_default(subscriber)
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

struct CaptureLayer(CapturedLogs);

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        (self.0).0.lock().unwrap().push((*event.metadata().level(), visitor.0));
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

pub const LANGUAGES: &str = "\
id,name,iso.dot.name
1,czech,cs
2,slovak,sk
3,english,en
4,german,de
5,french,fr
6,spanish,es
7,italian,it
8,polish,pl
9,dutch,nl
10,danish,da
";

pub fn csv(data: &str) -> CsvRowSource {
    CsvRowSource::from_reader(Cursor::new(data.as_bytes().to_vec())).unwrap()
}

/// `rows` data rows with ids 1..=rows.
pub fn numbered_csv(rows: usize) -> String {
    let mut data = String::from("id,value\n");
    for i in 1..=rows {
        data.push_str(&format!("{},v{}\n", i, i));
    }
    data
}
