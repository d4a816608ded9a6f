// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Register names of the IAM gateway and the unit mainboard.

/// Register names indexed by register id.
pub(super) const REGISTER_NAMES: [&str; 294] = [
    "REG_IAM_HEARTBEAT",
    "REG_IAM_UPTIME",
    "REG_IAM_ACCESS_TOKEN",
    "REG_IAM_CPU_IDENTIFIER",
    "REG_IAM_PU_UPDATE_SOURCE",
    "REG_IAM_UPDATE_PROCESS_STATE",
    "REG_IAM_UPDATE_PROCESS_CURRENT_FILE_TRANSFER_PERCENTAGE",
    "REG_IAM_UPDATE_PROCESS_CURRENT_FILE",
    "REG_IAM_CFG_STORAGE_FILENAME_1",
    "REG_IAM_CFG_STORAGE_STATUS",
    "REG_IAM_CFG_STORAGE_TRANSFER_STATE",
    "REG_IAM_CFG_STORAGE_TRANSFER_PROGRESS",
    "REG_IAM_CFG_STORAGE_TRANSFER_ERROR_CODE",
    "REG_IAM_CFG_STORAGE_CTRL",
    "REG_MAINBOARD_PASSWD_PC_UNLOCKED",
    "REG_MAINBOARD_PASSWD_PC_SETTINGS",
    "REG_MAINBOARD_FACTORY_RESET",
    "REG_MAINBOARD_SET_USER_SAFE_CONFIG",
    "REG_MAINBOARD_ACTIVATE_USER_SAFE_CONFIG",
    "REG_MAINBOARD_USER_SAFE_CONFIG_VALID",
    "REG_MAINBOARD_FILTER_PERIOD",
    "REG_MAINBOARD_FILTER_PERIOD_SET",
    "REG_MAINBOARD_FILTER_REMAINING_TIME_L",
    "REG_MAINBOARD_FILTER_KIT_INDEX",
    "REG_MAINBOARD_TIME_YEAR",
    "REG_MAINBOARD_TIME_AUTO_SUM_WIN",
    "REG_MAINBOARD_HOUR_FORMAT",
    "REG_MAINBOARD_SYSTEM_UNIT_MODEL_TYPE",
    "REG_MAINBOARD_SYSTEM_UNIT_TEMPERATURE",
    "REG_MAINBOARD_USERMODE_MODE_HMI",
    "REG_MAINBOARD_USERMODE_HMI_CHANGE_REQUEST",
    "REG_MAINBOARD_SPEED_INDICATION_APP",
    "REG_MAINBOARD_TC_SP",
    "REG_MAINBOARD_IAQ_LEVEL",
    "REG_MAINBOARD_ECO_MODE_ON_OFF",
    "REG_MAINBOARD_LOCKED_USER",
    "REG_MAINBOARD_LOCKED_FILTER",
    "REG_MAINBOARD_LOCKED_WEEK_SCHEDULE",
    "REG_MAINBOARD_USERMODE_MANUAL_AIRFLOW_LEVEL_SAF",
    "REG_MAINBOARD_USERMODE_MANUAL_AIRFLOW_LEVEL_EAF",
    "REG_MAINBOARD_FAN_MANUAL_STOP_ALLOWED",
    "REG_MAINBOARD_SYSTEM_UNIT_MODEL1",
    "REG_MAINBOARD_SYSTEM_SERIAL_NUMBER1",
    "REG_MAINBOARD_SUW_REQUIRED",
    "REG_MAINBOARD_FAN_REGULATION_UNIT",
    "REG_MAINBOARD_SYSTEM_UNIT_FLOW",
    "REG_MAINBOARD_SYSTEM_UNIT_PRESSURE",
    "REG_MAINBOARD_FAN_REGULATION_PBAND",
    "REG_MAINBOARD_FAN_REGULATION_ITIME",
    "REG_MAINBOARD_K_FACTOR_SAF",
    "REG_MAINBOARD_K_FACTOR_EAF",
    "REG_MAINBOARD_WS_FAN_LEVEL_SCHEDULED",
    "REG_MAINBOARD_WS_FAN_LEVEL_UNSCHEDULED",
    "REG_MAINBOARD_SENSOR_SAT",
    "REG_MAINBOARD_SENSOR_OAT",
    "REG_MAINBOARD_SENSOR_FPT",
    "REG_MAINBOARD_SENSOR_RAT",
    "REG_MAINBOARD_SENSOR_EAT",
    "REG_MAINBOARD_SENSOR_ECT",
    "REG_MAINBOARD_SENSOR_EFT",
    "REG_MAINBOARD_SENSOR_OHT",
    "REG_MAINBOARD_SENSOR_RHS",
    "REG_MAINBOARD_SENSOR_BYS",
    "REG_MAINBOARD_SENSOR_EMT",
    "REG_MAINBOARD_SENSOR_RGS",
    "REG_MAINBOARD_SENSOR_CO2S_1",
    "REG_MAINBOARD_SENSOR_CO2S_2",
    "REG_MAINBOARD_SENSOR_CO2S_3",
    "REG_MAINBOARD_SENSOR_CO2S_4",
    "REG_MAINBOARD_SENSOR_CO2S_5",
    "REG_MAINBOARD_SENSOR_CO2S_6",
    "REG_MAINBOARD_SENSOR_RHS_1",
    "REG_MAINBOARD_SENSOR_RHS_2",
    "REG_MAINBOARD_SENSOR_RHS_3",
    "REG_MAINBOARD_SENSOR_RHS_4",
    "REG_MAINBOARD_SENSOR_RHS_5",
    "REG_MAINBOARD_SENSOR_RHS_6",
    "REG_MAINBOARD_SENSOR_CO2S",
    "REG_MAINBOARD_SENSOR_RHS_PDM",
    "REG_MAINBOARD_SENSOR_P_SAF",
    "REG_MAINBOARD_SENSOR_P_EAF",
    "REG_MAINBOARD_SENSOR_FLOW_SAF",
    "REG_MAINBOARD_SENSOR_FLOW_EAF",
    "REG_MAINBOARD_SENSOR_RPM_SAF",
    "REG_MAINBOARD_SENSOR_RPM_EAF",
    "REG_MAINBOARD_SENSOR_FLOW_PIGGYBACK_SAF",
    "REG_MAINBOARD_SENSOR_FLOW_PIGGYBACK_EAF",
    "REG_MAINBOARD_SENSOR_DI_BYF",
    "REG_MAINBOARD_SENSOR_PDM_EAT_CONFIGURED",
    "REG_MAINBOARD_SENSOR_PDM_EAT_VALUE",
    "REG_MAINBOARD_INPUT_EXTERNAL_CTRL_SAF",
    "REG_MAINBOARD_INPUT_EXTERNAL_CTRL_EAF",
    "REG_MAINBOARD_PDM_CONNECTED_RH",
    "REG_MAINBOARD_PDM_CONNECTED_T",
    "REG_MAINBOARD_PDM_CORRECTION_RH",
    "REG_MAINBOARD_PDM_CORRECTION_T",
    "REG_MAINBOARD_PIGGYBACK_1_PRESSURE_SAF",
    "REG_MAINBOARD_PIGGYBACK_1_PRESSURE_EAF",
    "REG_MAINBOARD_PIGGYBACK_1_SAF_COMPENSATION",
    "REG_MAINBOARD_PIGGYBACK_1_EAF_COMPENSATION",
    "REG_MAINBOARD_PIGGYBACK_1_MODE",
    "REG_MAINBOARD_PIGGYBACK_2_MODE",
    "REG_MAINBOARD_FUNCTION_ACTIVE_COOLING",
    "REG_MAINBOARD_FUNCTION_ACTIVE_FREE_COOLING",
    "REG_MAINBOARD_FUNCTION_ACTIVE_HEATING",
    "REG_MAINBOARD_FUNCTION_ACTIVE_DEFROSTING",
    "REG_MAINBOARD_FUNCTION_ACTIVE_HEAT_RECOVERY",
    "REG_MAINBOARD_FUNCTION_ACTIVE_COOLING_RECOVERY",
    "REG_MAINBOARD_FUNCTION_ACTIVE_MOISTURE_TRANSFER",
    "REG_MAINBOARD_FUNCTION_ACTIVE_SECONDARY_AIR",
    "REG_MAINBOARD_FUNCTION_ACTIVE_VACUUM_CLEANER",
    "REG_MAINBOARD_FUNCTION_ACTIVE_COOKER_HOOD",
    "REG_MAINBOARD_FUNCTION_ACTIVE_USER_LOCK",
    "REG_MAINBOARD_FUNCTION_ACTIVE_ECO_MODE",
    "REG_MAINBOARD_FUNCTION_ACTIVE_HEATER_COOL_DOWN",
    "REG_MAINBOARD_FUNCTION_ACTIVE_PRESSURE_GUARD",
    "REG_MAINBOARD_FUNCTION_ACTIVE_CDI_1",
    "REG_MAINBOARD_FUNCTION_ACTIVE_CDI_2",
    "REG_MAINBOARD_FUNCTION_ACTIVE_CDI_3",
    "REG_MAINBOARD_ALARM_TYPE_A",
    "REG_MAINBOARD_ALARM_TYPE_B",
    "REG_MAINBOARD_ALARM_TYPE_C",
    "REG_MAINBOARD_ALARM_SAF_CTRL_ERROR",
    "REG_MAINBOARD_ALARM_SAF_CTRL_ALARM",
    "REG_MAINBOARD_ALARM_SAF_CTRL_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_EAF_CTRL_ERROR",
    "REG_MAINBOARD_ALARM_EAF_CTRL_ALARM",
    "REG_MAINBOARD_ALARM_EAF_CTRL_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_FROST_PROT_ERROR",
    "REG_MAINBOARD_ALARM_FROST_PROT_ALARM",
    "REG_MAINBOARD_ALARM_FROST_PROT_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_DEFROSTING_ERROR",
    "REG_MAINBOARD_ALARM_DEFROSTING_ALARM",
    "REG_MAINBOARD_ALARM_DEFROSTING_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_SAF_RPM_ERROR",
    "REG_MAINBOARD_ALARM_SAF_RPM_ALARM",
    "REG_MAINBOARD_ALARM_SAF_RPM_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_EAF_RPM_ERROR",
    "REG_MAINBOARD_ALARM_EAF_RPM_ALARM",
    "REG_MAINBOARD_ALARM_EAF_RPM_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_FPT_ERROR",
    "REG_MAINBOARD_ALARM_FPT_ALARM",
    "REG_MAINBOARD_ALARM_FPT_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_OAT_ERROR",
    "REG_MAINBOARD_ALARM_OAT_ALARM",
    "REG_MAINBOARD_ALARM_OAT_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_SAT_ERROR",
    "REG_MAINBOARD_ALARM_SAT_ALARM",
    "REG_MAINBOARD_ALARM_SAT_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_RAT_ERROR",
    "REG_MAINBOARD_ALARM_RAT_ALARM",
    "REG_MAINBOARD_ALARM_RAT_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_EAT_ERROR",
    "REG_MAINBOARD_ALARM_EAT_ALARM",
    "REG_MAINBOARD_ALARM_EAT_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_ECT_ERROR",
    "REG_MAINBOARD_ALARM_ECT_ALARM",
    "REG_MAINBOARD_ALARM_ECT_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_EFT_ERROR",
    "REG_MAINBOARD_ALARM_EFT_ALARM",
    "REG_MAINBOARD_ALARM_EFT_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_OHT_ERROR",
    "REG_MAINBOARD_ALARM_OHT_ALARM",
    "REG_MAINBOARD_ALARM_OHT_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_EMT_ERROR",
    "REG_MAINBOARD_ALARM_EMT_ALARM",
    "REG_MAINBOARD_ALARM_EMT_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_RGS_ERROR",
    "REG_MAINBOARD_ALARM_RGS_ALARM",
    "REG_MAINBOARD_ALARM_RGS_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_BYS_ERROR",
    "REG_MAINBOARD_ALARM_BYS_ALARM",
    "REG_MAINBOARD_ALARM_BYS_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_SECONDARY_AIR_ERROR",
    "REG_MAINBOARD_ALARM_SECONDARY_AIR_ALARM",
    "REG_MAINBOARD_ALARM_SECONDARY_AIR_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_FILTER_ERROR",
    "REG_MAINBOARD_ALARM_FILTER_ALARM",
    "REG_MAINBOARD_ALARM_FILTER_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_EXTRA_CONTROLLER_ERROR",
    "REG_MAINBOARD_ALARM_EXTRA_CONTROLLER_ALARM",
    "REG_MAINBOARD_ALARM_EXTRA_CONTROLLER_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_EXTERNAL_STOP_ERROR",
    "REG_MAINBOARD_ALARM_EXTERNAL_STOP_ALARM",
    "REG_MAINBOARD_ALARM_EXTERNAL_STOP_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_MANUAL_OVERRIDE_OUTPUTS_ERROR",
    "REG_MAINBOARD_ALARM_MANUAL_OVERRIDE_OUTPUTS_ALARM",
    "REG_MAINBOARD_ALARM_MANUAL_OVERRIDE_OUTPUTS_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_RH_ERROR",
    "REG_MAINBOARD_ALARM_RH_ALARM",
    "REG_MAINBOARD_ALARM_RH_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_CO2_ERROR",
    "REG_MAINBOARD_ALARM_CO2_ALARM",
    "REG_MAINBOARD_ALARM_CO2_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_LOW_SAT_ERROR",
    "REG_MAINBOARD_ALARM_LOW_SAT_ALARM",
    "REG_MAINBOARD_ALARM_LOW_SAT_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_BYF_ERROR",
    "REG_MAINBOARD_ALARM_BYF_ALARM",
    "REG_MAINBOARD_ALARM_BYF_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_PDM_RHS_ERROR",
    "REG_MAINBOARD_ALARM_PDM_RHS_ALARM",
    "REG_MAINBOARD_ALARM_PDM_RHS_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_PDM_EAT_ERROR",
    "REG_MAINBOARD_ALARM_PDM_EAT_ALARM",
    "REG_MAINBOARD_ALARM_PDM_EAT_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_MANUAL_FAN_STOP_ERROR",
    "REG_MAINBOARD_ALARM_MANUAL_FAN_STOP_ALARM",
    "REG_MAINBOARD_ALARM_MANUAL_FAN_STOP_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_OVERHEAT_TEMPERATURE_ERROR",
    "REG_MAINBOARD_ALARM_OVERHEAT_TEMPERATURE_ALARM",
    "REG_MAINBOARD_ALARM_OVERHEAT_TEMPERATURE_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_FIRE_ALARM_ERROR",
    "REG_MAINBOARD_ALARM_FIRE_ALARM_ALARM",
    "REG_MAINBOARD_ALARM_FIRE_ALARM_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_FILTER_WARNING_ERROR",
    "REG_MAINBOARD_ALARM_FILTER_WARNING_ALARM",
    "REG_MAINBOARD_ALARM_FILTER_WARNING_CLEAR_ALARM",
    "REG_MAINBOARD_ALARM_SAF_CTRL_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_EAF_CTRL_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_FROST_PROT_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_DEFROSTING_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_SAF_RPM_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_EAF_RPM_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_FPT_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_OAT_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_SAT_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_RAT_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_EAT_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_ECT_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_EFT_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_OHT_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_EMT_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_RGS_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_BYS_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_SECONDARY_AIR_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_FILTER_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_EXTRA_CONTROLLER_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_EXTERNAL_STOP_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_RH_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_CO2_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_LOW_SAT_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_BYF_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_PDM_RHS_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_PDM_EAT_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_MANUAL_OVERRIDE_OUTPUTS_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_MANUAL_FAN_STOP_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_OVERHEAT_TEMPERATURE_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_FIRE_ALARM_TIMESTAMP_L",
    "REG_MAINBOARD_ALARM_FILTER_WARNING_TIMESTAMP_L",
    "REG_MAINBOARD_USERMODE_REMAINING_TIME_L",
    "REG_MAINBOARD_USERMODE_HOLIDAY_TIME",
    "REG_MAINBOARD_USERMODE_AWAY_TIME",
    "REG_MAINBOARD_USERMODE_FIREPLACE_TIME",
    "REG_MAINBOARD_USERMODE_REFRESH_TIME",
    "REG_MAINBOARD_USERMODE_CROWDED_TIME",
    "REG_MAINBOARD_DEMC_CO2_SETTINGS_ON_OFF",
    "REG_MAINBOARD_DEMC_RH_SETTINGS_ON_OFF",
    "REG_MAINBOARD_WS_ANY_DEFINED",
    "REG_MAINBOARD_HEAT_EXCHANGER_TYPE",
    "REG_MAINBOARD_UNIT_CONFIG_REHEATER_TYPE",
    "REG_MAINBOARD_UNIT_CONFIG_BYPASS_LOCATION",
    "REG_MAINBOARD_DEFROSTING_DISABLE",
    "REG_MAINBOARD_CFG_HEAT_EXCHANGER_ACTUATOR_TYPE",
    "REG_MAINBOARD_PASSIVE_HOUSE_ACTIVATION",
    "REG_MAINBOARD_PASSIVE_HOUSE_CERTIFICATION",
    "REG_MAINBOARD_PASSIVE_HOUSE_MAX_LIMIT",
    "REG_MAINBOARD_CFG_HEATER_ACTUATOR_TYPE",
    "REG_MAINBOARD_CFG_CHANGE_OVER_ACTUATOR_TYPE",
    "REG_MAINBOARD_HEATER_CIRC_PUMP_START_T",
    "REG_MAINBOARD_HEATER_CIRC_PUMP_STOP_DELAY",
    "REG_MAINBOARD_CHANGE_OVER_CIRC_PUMP_START_T",
    "REG_MAINBOARD_CHANGE_OVER_CIRC_PUMP_STOP_DELAY",
    "REG_MAINBOARD_UNIT_CONFIG_COOLER",
    "REG_MAINBOARD_CFG_COOLER_ACTUATOR_TYPE",
    "REG_MAINBOARD_COOLER_OAT_INTERLOCK_T",
    "REG_MAINBOARD_COOLER_CIRC_PUMP_STOP_DELAY",
    "REG_MAINBOARD_UNIT_CONFIG_EXTRA_CONTROLLER",
    "REG_MAINBOARD_EXTRA_CONTROLLER_PREHEATER_SETPOINT_TYPE",
    "REG_MAINBOARD_EXTRA_CONTROLLER_SET_PI_SETPOINT",
    "REG_MAINBOARD_EXTRA_CONTROLLER_SET_PI_PBAND",
    "REG_MAINBOARD_EXTRA_CONTROLLER_SET_PI_ITIME",
    "REG_MAINBOARD_CFG_EXTRA_ACTUATOR_TYPE",
    "REG_MAINBOARD_EXTRA_CONTROLLER_CIRC_PUMP_START_T",
    "REG_MAINBOARD_EXTRA_CONTROLLER_CIRC_PUMP_STOP_DELAY",
    "REG_MAINBOARD_EXTRA_CONTROLLER_GEO_PRECOOLER_SP",
    "REG_MAINBOARD_EXTRA_CONTROLLER_GEO_PRECOOLER_ACTIVATION_T",
    "REG_MAINBOARD_EXTRA_CONTROLLER_GEO_PREHEATER_SP",
    "REG_MAINBOARD_EXTRA_CONTROLLER_GEO_PREHEATER_ACTIVATION_T",
    "REG_MAINBOARD_PASSWD_ADMIN",
    "REG_MAINBOARD_PU_UPDATE_SOURCE",
    "REG_MAINBOARD_PU_RUNNING_VERSION_MAJOR",
    "REG_MAINBOARD_PU_RUNNING_VERSION_MINOR",
    "REG_MAINBOARD_PU_RUNNING_VERSION_BUILD",
];
