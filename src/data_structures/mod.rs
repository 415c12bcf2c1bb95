pub mod local_queues;
pub mod priority_queue;

pub use local_queues::LocalQueues;
pub use priority_queue::BinaryHeapWrapper;
