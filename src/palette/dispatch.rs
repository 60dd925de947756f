#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchRequest<'a, A> {
    Action(&'a A),
    Commandline(&'a str),
}

/// Runs whatever the palette confirms. Returns whether the request was
/// handled; the palette stays open after an unhandled command line.
pub trait ActionDispatch<A> {
    fn dispatch(&mut self, request: DispatchRequest<'_, A>) -> bool;
}

impl<A, F> ActionDispatch<A> for F
where
    F: FnMut(DispatchRequest<'_, A>) -> bool,
{
    fn dispatch(&mut self, request: DispatchRequest<'_, A>) -> bool {
        self(request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched<A> {
    Action(A),
    Commandline(String),
}

/// Keeps every request it receives. Useful as a host that only needs to
/// know what was chosen once the palette closes.
#[derive(Debug, Clone)]
pub struct RecordingDispatcher<A> {
    pub requests: Vec<Dispatched<A>>,
    accept_commandline: bool,
}

impl<A> RecordingDispatcher<A> {
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
            accept_commandline: true,
        }
    }

    pub fn rejecting_commandline(mut self) -> Self {
        self.accept_commandline = false;
        self
    }

    pub fn last(&self) -> Option<&Dispatched<A>> {
        self.requests.last()
    }
}

impl<A> Default for RecordingDispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Clone> ActionDispatch<A> for RecordingDispatcher<A> {
    fn dispatch(&mut self, request: DispatchRequest<'_, A>) -> bool {
        match request {
            DispatchRequest::Action(action) => {
                self.requests.push(Dispatched::Action(action.clone()));
                true
            }
            DispatchRequest::Commandline(commandline) => {
                self.requests
                    .push(Dispatched::Commandline(commandline.to_string()));
                self.accept_commandline
            }
        }
    }
}
