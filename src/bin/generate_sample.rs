//! Writes `sample_bol02.csv`, a deterministic stand-in for the real BOL02
//! export: fixed clients/parts/references, plus the messy values the
//! normalizer has to cope with (sentinel tokens, `01/01/1900` entry dates,
//! mixed date formats, stray whitespace).

const HEADERS: [&str; 14] = [
    "ORIGEN",
    "NP",
    "NP_ACEPTADA",
    "DESCRIPCION",
    "MOD",
    "STATUS",
    "CLIENTE",
    "SOLICITADO",
    "REFERENCIA",
    "ESTADO",
    "ETD",
    "SHIP_DATE",
    "FECHA_INGRESO",
    "FECHA_SOLICITADO",
];

const ORIGINS: [&str; 4] = ["JAPON", "USA", "MEXICO", "(en blanco)"];
const PARTS: [&str; 5] = ["110445RB0A", "558900XX1C", "774210JG0B", "110445RB0A", "nan"];
const MODELS: [&str; 3] = ["X-TRAIL", "SENTRA", "KICKS"];
const CLIENTS: [&str; 4] = ["ACME", "GLOBEX", "acme industrial", "N/A"];
const REQUESTERS: [&str; 3] = ["jperez", "mlopez", "None"];
const STATES: [&str; 4] = ["EN TRANSITO", "ENTREGADO", "PENDIENTE", "EN ADUANA"];

fn main() {
    let output_path = "sample_bol02.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer.write_record(HEADERS).expect("Failed to write header");

    let n_rows = 100;
    for i in 0..n_rows {
        let day = (i % 28) + 1;
        let etd = format!("{day:02}/03/2026");
        // Every fourth row ships with an ISO timestamp, like re-exported rows do.
        let ship_date = match i % 4 {
            0 => format!("{:02}/04/2026", day),
            1 => format!("2026-04-{day:02} 08:30:00"),
            2 => String::new(),
            _ => "no disponible".to_string(),
        };
        // A third of the rows have not been entered yet.
        let entry_date = match i % 3 {
            0 => format!("{day:02}/05/2026"),
            1 => "01/01/1900".to_string(),
            _ => String::new(),
        };
        let requested_date = format!("{day:02}/02/2026");

        let reference = format!("NI10{:02}M", i % 40);
        let description = if i % 7 == 0 { "  EMPAQUE  " } else { "VALVULA" };

        writer
            .write_record([
                ORIGINS[i % ORIGINS.len()],
                PARTS[i % PARTS.len()],
                if i % 5 == 0 { "" } else { PARTS[i % PARTS.len()] },
                description,
                MODELS[i % MODELS.len()],
                if i % 6 == 0 { "n/a" } else { "OK" },
                CLIENTS[i % CLIENTS.len()],
                REQUESTERS[i % REQUESTERS.len()],
                reference.as_str(),
                STATES[i % STATES.len()],
                etd.as_str(),
                ship_date.as_str(),
                entry_date.as_str(),
                requested_date.as_str(),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_rows} rows to {output_path}");
}
