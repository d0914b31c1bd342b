use std::path::PathBuf;

use thiserror::Error;

/// Erros possíveis durante a extração e consolidação de extratos OFX
#[derive(Error, Debug)]
pub enum StatementParseError {
    /// Falha genérica ao montar o documento a partir do conteúdo (detalhe na mensagem)
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    /// Erro ao ler o conteúdo do arquivo do disco
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// Diretório de origem inexistente ou ilegível
    #[error("Failed to list directory {path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Erros de campos da transação ────────────────────────────────────────────

    /// Transação sem `DTPOSTED`
    #[error("Transaction has no DTPOSTED field")]
    MissingPostedDate,

    /// Data OFX curta demais para o fatiamento posicional YYYYMMDD
    #[error("Invalid OFX date format: {value:?}")]
    OfxDateInvalidFormat { value: String },

    /// `TRNAMT` ou `CURRATE` ausente ou não numérico quando a conversão é necessária
    #[error("Invalid {field} value: {value:?}")]
    AmountInvalid {
        field: &'static str,
        value: Option<String>,
    },

    /// O produto valor × taxa não é finito ou não cabe em um decimal
    #[error("Converted amount is not representable: {amount} * {rate}")]
    NonFiniteAmount { amount: f64, rate: f64 },

    // ── Erros de saída ──────────────────────────────────────────────────────────

    /// Falha ao serializar o documento consolidado
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Falha ao gravar o arquivo consolidado
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Erro ocorrido ao processar um arquivo específico
    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<StatementParseError>,
    },
}

impl StatementParseError {
    /// Anexa o caminho do arquivo que originou o erro
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        StatementParseError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Alias conveniente para Result com nosso tipo de erro principal
pub type StatementResult<T> = Result<T, StatementParseError>;
