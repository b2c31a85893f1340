use smallvec::SmallVec;

/// One way of a set. `tag` is meaningless while `valid` is false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Line {
    pub tag: u32,
    pub valid: bool,
}

impl Line {
    pub fn new(tag: u32) -> Self {
        Self { tag, valid: true }
    }

    pub fn matches(&self, tag: u32) -> bool {
        self.valid && self.tag == tag
    }
}

/// A fixed number of ways plus the round-robin cursor that orders
/// replacement. Empty ways are reused first, scanning forward from the
/// cursor; once the set is full the way under the cursor is the victim,
/// regardless of how recently anything was accessed.
#[derive(Debug, Clone)]
pub struct AssociativeSet {
    lines: SmallVec<[Line; 8]>,
    next_victim: usize,
}

impl AssociativeSet {
    pub fn new(ways: usize) -> Self {
        let ways = ways.max(1);
        Self {
            lines: SmallVec::from_elem(Line::default(), ways),
            next_victim: 0,
        }
    }

    pub fn ways(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn next_victim(&self) -> usize {
        self.next_victim
    }

    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|line| line.valid).count()
    }

    pub fn is_full(&self) -> bool {
        self.lines.iter().all(|line| line.valid)
    }

    pub fn probe(&self, tag: u32) -> bool {
        self.find(tag).is_some()
    }

    /// Way holding a valid copy of `tag`, if any.
    pub fn find(&self, tag: u32) -> Option<usize> {
        self.lines.iter().position(|line| line.matches(tag))
    }

    pub fn select_insert_slot(&self) -> usize {
        let ways = self.ways();
        (0..ways)
            .map(|step| (self.next_victim + step) % ways)
            .find(|&way| !self.lines[way].valid)
            .unwrap_or(self.next_victim)
    }

    /// Installs `tag` in `way` and moves the cursor past it. Returns the
    /// displaced line only if it was valid, i.e. a real eviction.
    pub fn insert(&mut self, tag: u32, way: usize) -> Option<Line> {
        let previous = std::mem::replace(&mut self.lines[way], Line::new(tag));
        self.next_victim = (way + 1) % self.ways();
        previous.valid.then_some(previous)
    }

    /// `select_insert_slot` followed by `insert`.
    pub fn fill(&mut self, tag: u32) -> (usize, Option<Line>) {
        let way = self.select_insert_slot();
        (way, self.insert(tag, way))
    }

    /// Clears `way` without touching the cursor.
    pub fn invalidate(&mut self, way: usize) -> Option<Line> {
        let line = &mut self.lines[way];
        let previous = *line;
        line.valid = false;
        previous.valid.then_some(previous)
    }

    pub fn valid_tags(&self) -> impl Iterator<Item = u32> + '_ {
        self.lines.iter().filter(|line| line.valid).map(|line| line.tag)
    }
}
