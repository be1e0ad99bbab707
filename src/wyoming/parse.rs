use chrono::NaiveDateTime;
use metfor::{Celsius, HectoPascal, Knots, Meters};

use crate::{
    coords::Coords,
    errors::SkewTErr,
    sounding::{wind_components, DataRow, Sounding},
    station::StationInfo,
};

const COLUMN_WIDTH: usize = 7;

// Columns of the TEXT:LIST table.
const PRES: usize = 0;
const HGHT: usize = 1;
const TEMP: usize = 2;
const DWPT: usize = 3;
const DRCT: usize = 6;
const SKNT: usize = 7;

/// Parse a TEXT:LIST page from the sounding archive.
///
/// Levels missing any of pressure, height, temperature, dew point, or wind are skipped so the
/// profiles in the returned sounding stay aligned.
pub fn parse_page(page: &str) -> Result<Sounding, SkewTErr> {
    let mut blocks = PreBlocks::new(page);

    let table = blocks
        .next()
        .ok_or_else(|| SkewTErr::MalformedResponse("no data table in page".to_owned()))?;

    let mut station = blocks.next().map(parse_station_block).unwrap_or_default();
    station.name = parse_title(page, &station);

    let rows = parse_table(table)?;
    if rows.is_empty() {
        return Err(SkewTErr::NotEnoughData);
    }

    Sounding::from_rows(station, rows)
}

fn parse_table(table: &str) -> Result<Vec<DataRow>, SkewTErr> {
    let mut lines = table.lines().skip_while(|line| line.trim().is_empty());

    // Dashes, column names, units, dashes.
    let header: Vec<&str> = lines.by_ref().take(4).collect();
    if header.len() != 4
        || !header[0].trim_start().starts_with('-')
        || !header[1].contains("PRES")
        || !header[1].contains("TEMP")
        || !header[3].trim_start().starts_with('-')
    {
        return Err(SkewTErr::MalformedResponse(
            "unrecognized table header".to_owned(),
        ));
    }

    let mut rows = vec![];
    for line in lines.filter(|line| !line.trim().is_empty()) {
        let vals = (
            column(line, PRES)?,
            column(line, HGHT)?,
            column(line, TEMP)?,
            column(line, DWPT)?,
            column(line, DRCT)?,
            column(line, SKNT)?,
        );

        if let (Some(p), Some(h), Some(t), Some(dp), Some(dir), Some(spd)) = vals {
            let (u_wind, v_wind) = wind_components(dir, Knots(spd));
            rows.push(DataRow {
                pressure: HectoPascal(p),
                height: Meters(h),
                temperature: Celsius(t),
                dew_point: Celsius(dp),
                u_wind,
                v_wind,
                wind_speed: Knots(spd),
            });
        }
    }

    Ok(rows)
}

/// Get the value in a fixed width column, `None` if it is blank.
fn column(line: &str, idx: usize) -> Result<Option<f64>, SkewTErr> {
    let start = idx * COLUMN_WIDTH;
    if start >= line.len() {
        return Ok(None);
    }
    let end = usize::min(start + COLUMN_WIDTH, line.len());

    let text = line
        .get(start..end)
        .ok_or_else(|| SkewTErr::MalformedResponse(format!("non-ascii data line: {}", line)))?
        .trim();

    if text.is_empty() {
        return Ok(None);
    }

    text.parse::<f64>().map(Some).map_err(|_| {
        SkewTErr::MalformedResponse(format!("bad value '{}' in line '{}'", text, line))
    })
}

fn parse_station_block(block: &str) -> StationInfo {
    let mut info = StationInfo::default();
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;

    for (key, val) in block
        .lines()
        .filter_map(|line| line.find(':').map(|idx| line.split_at(idx)))
        .map(|(key, val)| (key.trim(), val[1..].trim()))
    {
        match key {
            "Station identifier" => info.id = Some(val.to_owned()),
            "Station number" => info.station_num = val.parse().ok(),
            "Observation time" => {
                info.valid_time = NaiveDateTime::parse_from_str(val, "%y%m%d/%H%M").ok()
            }
            "Station latitude" => lat = val.parse().ok(),
            "Station longitude" => lon = val.parse().ok(),
            "Station elevation" => info.elevation = val.parse().ok().map(Meters),
            "Precipitable water [mm] for entire sounding" => {
                info.precipitable_water = val.parse().ok()
            }
            _ => {}
        }
    }

    if let (Some(lat), Some(lon)) = (lat, lon) {
        info.location = Some(Coords::from((lat, lon)));
    }

    info
}

/// The station name sits in the page title between the identifiers and "Observations".
fn parse_title(page: &str, station: &StationInfo) -> Option<String> {
    let lower = page.to_ascii_lowercase();
    let start = lower.find("<h2>")? + "<h2>".len();
    let end = start + lower[start..].find("</h2>")?;
    let title = &page[start..end];
    let title = &title[..title.find("Observations")?];

    let number = station.station_num.map(|num| num.to_string());
    let name: Vec<&str> = title
        .split_whitespace()
        .filter(|word| Some(*word) != station.id.as_deref())
        .filter(|word| Some(*word) != number.as_deref())
        .collect();

    if name.is_empty() {
        None
    } else {
        Some(name.join(" "))
    }
}

/// Iterator over the contents of the `<pre>` blocks in a page.
struct PreBlocks<'a> {
    page: &'a str,
    lower: String,
    pos: usize,
}

impl<'a> PreBlocks<'a> {
    fn new(page: &'a str) -> Self {
        PreBlocks {
            page,
            lower: page.to_ascii_lowercase(),
            pos: 0,
        }
    }
}

impl<'a> Iterator for PreBlocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos + self.lower[self.pos..].find("<pre>")? + "<pre>".len();
        let end = start + self.lower[start..].find("</pre>")?;
        self.pos = end + "</pre>".len();

        Some(&self.page[start..end])
    }
}
