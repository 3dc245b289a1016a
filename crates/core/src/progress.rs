/// Receives status updates as steps and tasks are run.
pub trait Progress {
    fn start(&mut self, title: &str);
    fn done(&mut self, title: &str);
    fn skip(&mut self, title: &str);
    fn fail(&mut self, title: &str);
    fn warn(&mut self, message: &str);
}

/// Discards all updates.
#[derive(Default, Debug)]
pub struct Silent;

impl Progress for Silent {
    fn start(&mut self, _title: &str) {}
    fn done(&mut self, _title: &str) {}
    fn skip(&mut self, _title: &str) {}
    fn fail(&mut self, _title: &str) {}
    fn warn(&mut self, _message: &str) {}
}
