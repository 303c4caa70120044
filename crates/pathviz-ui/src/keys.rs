use pathviz_core::Key;

/// Key bindings for the visualizer.
#[derive(Debug, Clone)]
pub struct VisualizerKeys {
    pub run: Vec<Key>,
    pub stop: Vec<Key>,
    pub cycle_algorithm: Vec<Key>,
    pub faster: Vec<Key>,
    pub slower: Vec<Key>,
    pub clear_path: Vec<Key>,
    pub reset: Vec<Key>,
    pub clear_walls: Vec<Key>,
    pub new_grid: Vec<Key>,
    pub quit: Vec<Key>,
}

impl Default for VisualizerKeys {
    fn default() -> Self {
        Self {
            run: vec![Key::Enter, Key::Space],
            stop: vec![Key::Char('s')],
            cycle_algorithm: vec![Key::Char('a'), Key::Tab],
            faster: vec![Key::Char('+'), Key::Char('=')],
            slower: vec![Key::Char('-')],
            clear_path: vec![Key::Char('c')],
            reset: vec![Key::Char('r')],
            clear_walls: vec![Key::Char('w')],
            new_grid: vec![Key::Char('n')],
            quit: vec![Key::Escape, Key::Char('q')],
        }
    }
}

impl VisualizerKeys {
    /// One-line summary of the default bindings.
    pub const HELP: &'static str = "enter run  s stop  a algorithm  +/- speed  \
                                    c clear path  r reset  w clear walls  n new grid  q quit";
}

/// What a bound key asks the visualizer to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Run,
    Stop,
    CycleAlgorithm,
    Faster,
    Slower,
    ClearPath,
    Reset,
    ClearWalls,
    NewGrid,
    Quit,
}

impl VisualizerKeys {
    /// The action bound to `key`, if any. Earlier bindings win.
    pub fn action(&self, key: &Key) -> Option<Action> {
        [
            (&self.quit, Action::Quit),
            (&self.run, Action::Run),
            (&self.stop, Action::Stop),
            (&self.cycle_algorithm, Action::CycleAlgorithm),
            (&self.faster, Action::Faster),
            (&self.slower, Action::Slower),
            (&self.clear_path, Action::ClearPath),
            (&self.reset, Action::Reset),
            (&self.clear_walls, Action::ClearWalls),
            (&self.new_grid, Action::NewGrid),
        ]
        .into_iter()
        .find(|(keys, _)| keys.contains(key))
        .map(|(_, action)| action)
    }
}
