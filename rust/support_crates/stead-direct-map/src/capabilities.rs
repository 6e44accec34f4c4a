use bitflags::bitflags;

bitflags! {
    /// Structural properties a container guarantees about its contents.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Iteration yields keys in ascending order.
        const SORTED = 1;
        /// The same key may be present more than once.
        const DUPLICATE_KEYS = 2;
        /// Keys are integers used as direct addresses.
        const INTEGER_KEYS = 4;
        /// Keys may be added in any order, including descending.
        const REVERSE_KEY_ADD = 8;
    }
}

impl Capabilities {
    /// Capabilities of every direct-address container: unsorted, unique integer keys.
    pub const DIRECT_ADDRESS: Capabilities =
        Capabilities::INTEGER_KEYS.union(Capabilities::REVERSE_KEY_ADD);
}
