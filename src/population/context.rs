/// Run-scoped counters threaded through member construction.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    next_member_id: u64,
    pub generation: usize,
    /// Age given to every member at construction.
    pub newborn_age: i32,
}

impl GenerationContext {
    pub fn new(newborn_age: i32) -> Self {
        Self {
            next_member_id: 0,
            generation: 0,
            newborn_age,
        }
    }

    /// Allocate the next unique member id.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_member_id;
        self.next_member_id += 1;
        id
    }

    pub fn advance(&mut self) {
        self.generation += 1;
    }
}
