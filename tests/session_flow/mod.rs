mod fixtures;
mod history;
mod multi_object;
mod scenario;
