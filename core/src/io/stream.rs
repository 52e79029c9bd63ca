use {
    crate::{
        automaton::Automaton,
        io::{AsyncReadUnpin, AsyncWriteUnpin, AutomatonDocument},
        AutomataError,
    },
    async_trait::async_trait,
    log::debug,
    tokio::io::{AsyncReadExt, AsyncWriteExt},
};

/// Reads serialized automata from an [AsyncReadUnpin]. The whole stream is consumed.
#[async_trait(?Send)]
pub trait AutomatonReadExt: AsyncReadUnpin {
    /// Read an [AutomatonDocument] (`{"automaton": ..., "testString": ..., "nodePositions": ...}`).
    async fn read_document(&mut self) -> Result<AutomatonDocument, AutomataError> {
        let mut buf = Vec::new();
        self.read_to_end(&mut buf).await?;
        debug!("Read {} bytes of automaton document", buf.len());
        AutomatonDocument::from_slice(&buf)
    }

    /// Read a bare automaton record.
    async fn read_automaton(&mut self) -> Result<Automaton, AutomataError> {
        let mut buf = Vec::new();
        self.read_to_end(&mut buf).await?;
        Ok(serde_json::from_slice(&buf)?)
    }
}

impl<R: AsyncReadUnpin + ?Sized> AutomatonReadExt for R {}

/// Writes serialized automata to an [AsyncWriteUnpin].
#[async_trait(?Send)]
pub trait AutomatonWriteExt: AsyncWriteUnpin {
    /// Write `doc` as pretty-printed JSON and flush.
    async fn write_document(&mut self, doc: &AutomatonDocument) -> Result<(), AutomataError> {
        let json = doc.to_json()?;
        self.write_all(json.as_bytes()).await?;
        self.flush().await?;
        Ok(())
    }

    /// Write a bare automaton record as pretty-printed JSON and flush.
    async fn write_automaton(&mut self, a: &Automaton) -> Result<(), AutomataError> {
        let json = a.to_json()?;
        self.write_all(json.as_bytes()).await?;
        self.flush().await?;
        Ok(())
    }
}

impl<W: AsyncWriteUnpin + ?Sized> AutomatonWriteExt for W {}
