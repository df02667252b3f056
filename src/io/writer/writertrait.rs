use crate::error::Error;

/// Sinks for corpus items.
pub trait WriterTrait {
    type Item;

    fn write(&mut self, vals: Vec<Self::Item>) -> Result<(), Error> {
        for val in &vals {
            self.write_single(val)?;
        }
        Ok(())
    }
    fn write_single(&mut self, val: &Self::Item) -> Result<(), Error>;
    /// Flush pending writes.
    fn close(&mut self) -> Result<(), Error>;
}
