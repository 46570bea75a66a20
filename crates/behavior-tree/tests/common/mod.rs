use std::sync::{Arc, Mutex};

use behavior_tree::{Behavior, Blackboard, NodeFactories, Status};

/// Shared record of which scripted leaves were ticked, in order.
pub type TickLog = Arc<Mutex<Vec<String>>>;

/// Leaf that replays a fixed list of outcomes and logs every tick.
///
/// Outcomes are written as a string of `S`, `F` and `R`; the last one repeats
/// once the script is exhausted.
pub struct Scripted {
    name: String,
    outcomes: Vec<Status>,
    cursor: usize,
    log: TickLog,
}

impl Behavior for Scripted {
    fn tick(&mut self, _blackboard: &mut Blackboard) -> Status {
        self.log.lock().unwrap().push(self.name.clone());
        let status = self.outcomes[self.cursor.min(self.outcomes.len() - 1)];
        self.cursor += 1;
        status
    }

    fn kind(&self) -> &str {
        "Scripted"
    }
}

fn parse(script: &str) -> Vec<Status> {
    script
        .chars()
        .map(|c| match c {
            'S' => Status::Success,
            'F' => Status::Failure,
            'R' => Status::Running,
            other => panic!("bad script char {other}"),
        })
        .collect()
}

/// Builtin registry plus a `Scripted` kind (params `name`, `script`).
pub fn scripted_factories() -> (NodeFactories, TickLog) {
    let log = TickLog::default();
    let mut factories = NodeFactories::with_builtins();
    let shared = Arc::clone(&log);
    factories
        .register_fn("Scripted", move |conf, builder| {
            builder.expect_leaf(conf)?;
            Ok(Box::new(Scripted {
                name: conf.required("name")?,
                outcomes: parse(&conf.required::<String>("script")?),
                cursor: 0,
                log: Arc::clone(&shared),
            }))
        })
        .unwrap();
    (factories, log)
}

pub fn scripted(name: &str, script: &str) -> behavior_tree::NodeConf {
    behavior_tree::NodeConf::new("Scripted")
        .with_param("name", name)
        .with_param("script", script)
}

/// Drains the log.
pub fn take(log: &TickLog) -> Vec<String> {
    std::mem::take(&mut *log.lock().unwrap())
}
