//! Small fixture data set covering every source layout.

use std::fs;
use std::path::Path;

pub const CO2: &str = "\
isoA3,year,co2_per_capita
USA,2018,15.0
USA,2020,14.0
USA,2019,14.5
FRA,2020,4.5
CHL,2020,
CHL,2017,4.0
";

pub const AIR: &str = "\
Entity,Code,Year,Concentrations of fine particulate matter (PM2.5) - Residence area type: Total
United States, usa ,2019,7.0
France,FRA,2019,11.0
Kosovo,XKX,2019,25.0
World,,2019,31.0
";

pub const RENEWABLES_WDI: &str = "\
\"Data Source\",\"World Development Indicators\",

\"Last Updated Date\",\"2024-06-28\",

\"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\",\"2019\",\"2020\",\"2021\",
\"United States\",\"USA\",\"Renewable electricity output\",\"EG.ELC.RNEW.ZS\",\"17.5\",\"19.8\",\"\",
\"France\",\"FRA\",\"Renewable electricity output\",\"EG.ELC.RNEW.ZS\",\"21.0\",\"\",\"\",
\"Chile\",\"CHL\",\"Renewable electricity output\",\"EG.ELC.RNEW.ZS\",\"46.0\",\"48.0\",\"\",
";

pub const PROTECTED: &str = "\
isoA3,year,protected_land_pct
USA,2022,13.0
FRA,2022,28.0
CHL,2022,21.0
";

pub const WATER: &str = "\
Country Name,Country Code,2020,2021
United States,USA,97.0,97.0
France,FRA,100.0,
Chile,CHL,98.0,99.0
";

pub const LIFE: &str = "\
ISOA3,YEAR,Life_Expectancy_Yrs
usa,2021,76.4
fra,2021,82.3
chl,2021,78.9
";

pub const HDI: &str = "\
iso3,country,hdi_1990,hdi_2021,hdi_2022
USA,United States,0.87,0.92,0.927
FRA,France,0.79,0.90,
CHL,Chile,0.71,0.85,0.86
";

/// Write the fixture files under their conventional names in `dir`.
pub fn write_fixture(dir: &Path) {
    fs::write(dir.join("co2.csv"), CO2).unwrap();
    fs::write(dir.join("air_pollution.csv"), AIR).unwrap();
    fs::write(dir.join("wdi_renewables.csv"), RENEWABLES_WDI).unwrap();
    fs::write(dir.join("wdi_protected.csv"), PROTECTED).unwrap();
    fs::write(dir.join("safe_water.csv"), WATER).unwrap();
    fs::write(dir.join("life_expectancy.csv"), LIFE).unwrap();
    fs::write(dir.join("hdi.csv"), HDI).unwrap();
}
