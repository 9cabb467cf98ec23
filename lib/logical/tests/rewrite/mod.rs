mod blank_nodes;
mod identity;
mod renaming;
mod test_utils;
